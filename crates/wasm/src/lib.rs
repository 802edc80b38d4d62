use js_sys::{Array, Function};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

/// JS value conversion into factory inputs.
pub mod convert;
/// Browser document host.
pub mod host;

pub use host::WebDocument;

use convert::{attributes_from_js, child_from_js, js_string};
use domjsx_core::{TagDescriptor, create_element};

// ============================================================================
// JSX Factory
// ============================================================================

/// Builds a DOM node for one markup node.
///
/// Component functions are called as `tag(attributes, children)` with the
/// arguments exactly as received, and whatever they return is returned.
/// Tag names create an element in the current document (SVG tags in the SVG
/// namespace), apply the attributes, and append the children.
///
/// # Arguments
///
/// * `tag` - A tag name or a component function
/// * `attributes` - Attribute object, or `null`/`undefined`
/// * `children` - The child arguments as an array
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { jsxFactory } from './domjsx_wasm';
///
/// // Pragma target: /** @jsx h */
/// export const h = (tag, attributes, ...children) =>
///   jsxFactory(tag, attributes, children);
///
/// const button = h("button", { className: "primary", onClick: save }, "Save");
/// ```
#[wasm_bindgen(js_name = jsxFactory)]
pub fn jsx_factory(tag: JsValue, attributes: JsValue, children: Array) -> Result<JsValue, JsValue> {
    if let Some(component) = tag.dyn_ref::<Function>() {
        log::debug!("delegating to component with {} children", children.length());
        return component.call2(&JsValue::UNDEFINED, &attributes, &children);
    }

    let tag_name = tag.as_string().unwrap_or_else(|| js_string(&tag));
    let host = WebDocument::current()?;
    let attributes = attributes_from_js(&attributes)?;
    let children = children.iter().map(child_from_js).collect();

    let node = create_element(&host, TagDescriptor::Tag(tag_name), attributes, children)?;
    Ok(node.into())
}

// ============================================================================
// Tables
// ============================================================================

/// Returns true if `tag` is created in the SVG namespace.
#[wasm_bindgen(js_name = isSvgTag)]
pub fn is_svg_tag(tag: &str) -> bool {
    domjsx_core::is_svg_tag(tag)
}
