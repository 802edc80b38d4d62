//! Element factory: the runtime target of a JSX-style pragma.

use crate::children::append_child;
use crate::format::{date_to_string, number_to_string};
use crate::host::DocumentHost;
use crate::tables::{SVG_NAMESPACE, is_svg_tag, patch_attribute_name};
use crate::value::{AttributeValue, Attributes, Child, TagDescriptor};

/// Builds one markup node.
///
/// Components are called with the attribute bag and the child list exactly
/// as received, and their result is returned untouched. Tags create an
/// element (in the SVG namespace for SVG tag names), apply attributes in
/// order, then append each child in order.
///
/// Host failures propagate unchanged; an element that fails midway is
/// dropped.
///
/// # Example
///
/// ```
/// use domjsx_core::dom::{Document, serialize::to_html};
/// use domjsx_core::{Attributes, Child, create_element};
///
/// let doc = Document::new();
/// let node = create_element(
///     &doc,
///     "p".into(),
///     Some(Attributes::new().with("className", "lead")),
///     vec![Child::from("Hello "), Child::from(42)],
/// )
/// .unwrap();
///
/// assert_eq!(to_html(&doc, node), r#"<p class="lead">Hello 42</p>"#);
/// ```
pub fn create_element<H: DocumentHost>(
    host: &H,
    tag: TagDescriptor<H>,
    attributes: Option<Attributes<H::Listener>>,
    children: Vec<Child<H>>,
) -> Result<H::Node, H::Error> {
    let tag = match tag {
        TagDescriptor::Component(component) => {
            log::debug!("delegating to component with {} children", children.len());
            return component(attributes, children);
        }
        TagDescriptor::Tag(tag) => tag,
    };

    let element = if is_svg_tag(&tag) {
        log::debug!("creating <{}> in the SVG namespace", tag);
        host.create_element_ns(SVG_NAMESPACE, &tag)?
    } else {
        host.create_element(&tag)?
    };

    if let Some(attributes) = attributes {
        apply_attributes(host, &element, &tag, attributes)?;
    }

    for child in children {
        append_child(host, &element, child)?;
    }

    Ok(element)
}

fn apply_attributes<H: DocumentHost>(
    host: &H,
    element: &H::Node,
    tag: &str,
    attributes: Attributes<H::Listener>,
) -> Result<(), H::Error> {
    for (key, value) in attributes {
        let value = match value {
            AttributeValue::Listener(listener) => {
                if key.starts_with("on") {
                    let event = event_name(&key);
                    log::trace!("<{}> listening for '{}'", tag, event);
                    host.add_event_listener(element, &event, listener)?;
                } else {
                    log::warn!(
                        "<{}> attribute '{}' holds a listener but is not an event key; skipped",
                        tag,
                        key
                    );
                }
                continue;
            }
            AttributeValue::Bool(true) => String::new(),
            AttributeValue::Bool(false) => {
                log::trace!("<{}> attribute '{}' is false; skipped", tag, key);
                continue;
            }
            AttributeValue::Number(n) => number_to_string(n),
            AttributeValue::String(s) => s,
            AttributeValue::Date(d) => date_to_string(&d),
        };

        host.set_attribute(element, patch_attribute_name(tag, &key), &value)?;
    }
    Ok(())
}

/// Derives the listener event name from an `on*` key.
///
/// Only the first character after `on` is lower-cased; the rest is kept as
/// written, so `onDblClick` maps to `dblClick`.
pub fn event_name(key: &str) -> String {
    let suffix = key.strip_prefix("on").unwrap_or(key);
    let mut chars = suffix.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_name_lowercases_first_letter() {
        assert_eq!(event_name("onClick"), "click");
        assert_eq!(event_name("onMouseMove"), "mouseMove");
        assert_eq!(event_name("onclick"), "click");
    }

    #[test]
    fn event_name_keeps_rest_of_suffix() {
        // Only the first letter is folded; `dblclick` listeners need `onDblclick`.
        assert_eq!(event_name("onDblClick"), "dblClick");
        assert_eq!(event_name("onDOMContentLoaded"), "dOMContentLoaded");
    }

    #[test]
    fn event_name_of_bare_prefix_is_empty() {
        assert_eq!(event_name("on"), "");
    }
}
