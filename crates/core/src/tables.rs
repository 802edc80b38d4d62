//! Static lookup tables consulted by the element factory.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Namespace URI for SVG elements.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Namespace URI for HTML elements.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Tag names created in the SVG namespace.
///
/// `a`, `script`, `style` and `title` exist in both vocabularies; they are
/// always resolved to SVG here.
pub const SVG_TAG_NAMES: &[&str] = &[
    "a",
    "circle",
    "clipPath",
    "defs",
    "desc",
    "ellipse",
    "feBlend",
    "feColorMatrix",
    "feComponentTransfer",
    "feComposite",
    "feConvolveMatrix",
    "feDiffuseLighting",
    "feDisplacementMap",
    "feDistantLight",
    "feFlood",
    "feFuncA",
    "feFuncB",
    "feFuncG",
    "feFuncR",
    "feGaussianBlur",
    "feImage",
    "feMerge",
    "feMergeNode",
    "feMorphology",
    "feOffset",
    "fePointLight",
    "feSpecularLighting",
    "feSpotLight",
    "feTile",
    "feTurbulence",
    "filter",
    "foreignObject",
    "g",
    "image",
    "line",
    "linearGradient",
    "marker",
    "mask",
    "metadata",
    "path",
    "pattern",
    "polygon",
    "polyline",
    "radialGradient",
    "rect",
    "script",
    "stop",
    "style",
    "svg",
    "switch",
    "symbol",
    "text",
    "textPath",
    "title",
    "tspan",
    "use",
    "view",
];

static SVG_TAGS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SVG_TAG_NAMES.iter().copied().collect());

/// Returns true if `tag` is created in the SVG namespace.
pub fn is_svg_tag(tag: &str) -> bool {
    SVG_TAGS.contains(tag)
}

/// A rewrite of an attribute key to the name actually set on the element.
#[derive(Debug)]
pub struct AttributeNamePatch {
    /// Tags the rule is limited to; `None` applies to every tag.
    pub tags: Option<HashSet<&'static str>>,
    /// Key as written in markup.
    pub key: &'static str,
    /// Attribute name set on the element.
    pub new_key: &'static str,
}

impl AttributeNamePatch {
    fn applies_to(&self, tag: &str) -> bool {
        self.tags.as_ref().is_none_or(|tags| tags.contains(tag))
    }
}

/// Ordered patch rules; the first applicable rule wins.
pub static ATTRIBUTE_NAME_PATCHES: Lazy<Vec<AttributeNamePatch>> = Lazy::new(|| {
    vec![
        AttributeNamePatch {
            tags: None,
            key: "className",
            new_key: "class",
        },
        AttributeNamePatch {
            tags: Some(
                [
                    "circle",
                    "ellipse",
                    "foreignObject",
                    "image",
                    "line",
                    "path",
                    "polygon",
                    "polyline",
                    "rect",
                    "text",
                    "textPath",
                    "tspan",
                    "use",
                ]
                .into_iter()
                .collect(),
            ),
            key: "vectorEffect",
            new_key: "vector-effect",
        },
    ]
});

/// Resolves the attribute name to set for `key` on an element named `tag`.
pub fn patch_attribute_name<'k>(tag: &str, key: &'k str) -> &'k str {
    ATTRIBUTE_NAME_PATCHES
        .iter()
        .find(|patch| patch.applies_to(tag) && patch.key == key)
        .map_or(key, |patch| patch.new_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_set_is_case_sensitive() {
        assert!(is_svg_tag("clipPath"));
        assert!(!is_svg_tag("clippath"));
        assert!(is_svg_tag("svg"));
        assert!(!is_svg_tag("div"));
    }

    #[test]
    fn svg_table_has_no_duplicates() {
        assert_eq!(SVG_TAGS.len(), SVG_TAG_NAMES.len());
    }

    #[test]
    fn class_name_is_patched_everywhere() {
        assert_eq!(patch_attribute_name("div", "className"), "class");
        assert_eq!(patch_attribute_name("circle", "className"), "class");
        assert_eq!(patch_attribute_name("my-widget", "className"), "class");
    }

    #[test]
    fn vector_effect_is_scoped() {
        assert_eq!(patch_attribute_name("path", "vectorEffect"), "vector-effect");
        assert_eq!(patch_attribute_name("use", "vectorEffect"), "vector-effect");
        assert_eq!(patch_attribute_name("g", "vectorEffect"), "vectorEffect");
        assert_eq!(patch_attribute_name("div", "vectorEffect"), "vectorEffect");
    }

    #[test]
    fn unknown_keys_pass_through() {
        assert_eq!(patch_attribute_name("div", "id"), "id");
        assert_eq!(patch_attribute_name("div", "class"), "class");
    }
}
