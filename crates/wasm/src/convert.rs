//! Conversion of JavaScript arguments into factory inputs.

use crate::host::WebDocument;
use domjsx_core::{AttributeValue, Attributes, Child};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::Node;

#[wasm_bindgen]
extern "C" {
    /// ECMAScript `String(value)`.
    #[wasm_bindgen(js_name = String)]
    pub(crate) fn js_string(value: &JsValue) -> String;

    /// ECMAScript `Object(value)`; boxes primitives.
    #[wasm_bindgen(js_name = Object)]
    fn js_object(value: &JsValue) -> Object;
}

/// Reads a JS attribute object in `Object.keys` order.
///
/// Falsy values mean "no attributes". Primitives are boxed first, so a
/// string contributes its index keys. Functions under `on*` keys become
/// listeners; booleans stay booleans; anything else is stringified with
/// `String()`.
pub fn attributes_from_js(value: &JsValue) -> Result<Option<Attributes<Function>>, JsValue> {
    if !value.is_truthy() {
        return Ok(None);
    }
    let object = if value.is_object() {
        value.clone().unchecked_into::<Object>()
    } else {
        log::debug!("boxing primitive attributes: {}", js_string(value));
        js_object(value)
    };

    let mut attributes = Attributes::new();
    for key in Object::keys(&object).iter() {
        let entry = Reflect::get(&object, &key)?;
        let key = js_string(&key);
        let entry = attribute_value(&key, entry);
        attributes.insert(key, entry);
    }
    Ok(Some(attributes))
}

fn attribute_value(key: &str, value: JsValue) -> AttributeValue<Function> {
    let value = if key.starts_with("on") {
        match value.dyn_into::<Function>() {
            Ok(listener) => return AttributeValue::Listener(listener),
            Err(value) => value,
        }
    } else {
        value
    };

    match value.as_bool() {
        Some(flag) => AttributeValue::Bool(flag),
        None => AttributeValue::String(js_string(&value)),
    }
}

/// Classifies a JS child value.
///
/// Checks run in this order: nullish, array, string, `Node`, function,
/// boolean; everything else is stringified.
pub fn child_from_js(value: JsValue) -> Child<WebDocument> {
    if value.is_undefined() || value.is_null() {
        return Child::Absent;
    }
    if Array::is_array(&value) {
        return Child::List(
            value
                .unchecked_into::<Array>()
                .iter()
                .map(child_from_js)
                .collect(),
        );
    }
    if let Some(text) = value.as_string() {
        return Child::Text(text);
    }

    let value = match value.dyn_into::<Node>() {
        Ok(node) => return Child::Node(node),
        Err(value) => value,
    };
    let value = match value.dyn_into::<Function>() {
        Ok(thunk) => return Child::thunk(move || call_thunk(&thunk)),
        Err(value) => value,
    };

    match value.as_bool() {
        Some(flag) => Child::Bool(flag),
        None => Child::Other(js_string(&value)),
    }
}

fn call_thunk(thunk: &Function) -> Result<Node, JsValue> {
    thunk
        .call0(&JsValue::UNDEFINED)?
        .dyn_into::<Node>()
        .map_err(|value| {
            JsError::new(&format!(
                "child function returned a non-Node value: {}",
                js_string(&value)
            ))
            .into()
        })
}
