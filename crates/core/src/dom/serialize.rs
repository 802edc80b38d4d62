use super::{Document, NodeId, NodeSnapshot};
use crate::tables::HTML_NAMESPACE;

/// HTML void elements: no content and no end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Options for [`to_html_with`].
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Emit attributes sorted by name instead of first-set order.
    pub sort_attributes: bool,
    /// Render empty elements outside the HTML namespace as `<tag/>`.
    pub self_close_empty_foreign: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            sort_attributes: false,
            self_close_empty_foreign: true,
        }
    }
}

/// Serializes the subtree at `node` with default options.
///
/// Unknown handles produce an empty string.
pub fn to_html(doc: &Document, node: NodeId) -> String {
    to_html_with(doc, node, &HtmlOptions::default())
}

/// Serializes the subtree at `node`. Listeners are not part of the output.
pub fn to_html_with(doc: &Document, node: NodeId, options: &HtmlOptions) -> String {
    let mut out = String::new();
    if let Some(snapshot) = doc.snapshot(node) {
        write_node(&snapshot, options, &mut out);
    }
    out
}

fn write_node(node: &NodeSnapshot, options: &HtmlOptions, out: &mut String) {
    let (namespace, name, attributes, children) = match node {
        NodeSnapshot::Text { content } => {
            out.push_str(&html_escape::encode_text(content));
            return;
        }
        NodeSnapshot::Element {
            namespace,
            name,
            attributes,
            children,
            ..
        } => (namespace, name, attributes, children),
    };

    out.push('<');
    out.push_str(name);

    let mut attributes: Vec<&(String, String)> = attributes.iter().collect();
    if options.sort_attributes {
        attributes.sort_by(|a, b| a.0.cmp(&b.0));
    }
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }

    let is_html = namespace == HTML_NAMESPACE;
    if is_html && VOID_ELEMENTS.contains(&name.as_str()) {
        out.push('>');
        return;
    }
    if !is_html && children.is_empty() && options.self_close_empty_foreign {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in children {
        write_node(child, options, out);
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DocumentHost;
    use crate::tables::SVG_NAMESPACE;

    #[test]
    fn escapes_text_and_attributes() {
        let doc = Document::new();
        let el = doc.create_element("p").unwrap();
        doc.set_attribute(&el, "title", "a \"quoted\" <b>").unwrap();
        let text = doc.create_text_node("1 < 2 & 3").unwrap();
        doc.append_child(&el, &text).unwrap();

        assert_eq!(
            to_html(&doc, el),
            r#"<p title="a &quot;quoted&quot; &lt;b&gt;">1 &lt; 2 &amp; 3</p>"#
        );
    }

    #[test]
    fn void_and_foreign_elements() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        let br = doc.create_element("br").unwrap();
        let svg = doc.create_element_ns(SVG_NAMESPACE, "svg").unwrap();
        let circle = doc.create_element_ns(SVG_NAMESPACE, "circle").unwrap();
        doc.append_child(&svg, &circle).unwrap();
        doc.append_child(&div, &br).unwrap();
        doc.append_child(&div, &svg).unwrap();

        assert_eq!(to_html(&doc, div), "<div><br><svg><circle/></svg></div>");

        let options = HtmlOptions {
            self_close_empty_foreign: false,
            ..HtmlOptions::default()
        };
        assert_eq!(
            to_html_with(&doc, svg, &options),
            "<svg><circle></circle></svg>"
        );
    }

    #[test]
    fn sorted_attributes() {
        let doc = Document::new();
        let el = doc.create_element("a").unwrap();
        doc.set_attribute(&el, "href", "/").unwrap();
        doc.set_attribute(&el, "class", "nav").unwrap();

        assert_eq!(to_html(&doc, el), r#"<a href="/" class="nav"></a>"#);
        let options = HtmlOptions {
            sort_attributes: true,
            ..HtmlOptions::default()
        };
        assert_eq!(
            to_html_with(&doc, el, &options),
            r#"<a class="nav" href="/"></a>"#
        );
    }
}
