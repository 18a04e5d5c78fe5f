//! WASM bindings for the MistCSS compiler.
//!
//! Exposes `parse()`, `render()` and `version()` to JavaScript via wasm-bindgen.
//! Failures are thrown as JS errors.

use js_sys::{Array, Object, Reflect};
use mist_extract::{AttributeKind, ComponentDescriptor};
use wasm_bindgen::prelude::*;

/// Extract the component descriptor from a stylesheet.
///
/// Returns `{ className: string, tagName: string, attributes: {...} }` where
/// each attribute maps to an array of enum values or `true` for a boolean.
#[wasm_bindgen]
pub fn parse(css: &str) -> Result<JsValue, JsError> {
    let descriptor = mist_extract::parse_input(css).map_err(|e| JsError::new(&e.to_string()))?;
    descriptor_to_js(&descriptor)
}

/// Compile a stylesheet to the TSX source of component `name`.
#[wasm_bindgen]
pub fn render(name: &str, css: &str) -> Result<String, JsError> {
    mist_codegen::compile(name, css).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn descriptor_to_js(descriptor: &ComponentDescriptor) -> Result<JsValue, JsError> {
    let attributes = Object::new();
    for (name, kind) in &descriptor.attributes {
        let value: JsValue = match kind {
            AttributeKind::Boolean => JsValue::TRUE,
            AttributeKind::Enum(values) => values
                .iter()
                .map(|v| JsValue::from_str(v))
                .collect::<Array>()
                .into(),
        };
        set(&attributes, name, &value)?;
    }

    let js_obj = Object::new();
    set(&js_obj, "className", &descriptor.class_name.as_str().into())?;
    set(&js_obj, "tagName", &descriptor.tag_name.as_str().into())?;
    set(&js_obj, "attributes", &attributes.into())?;

    Ok(js_obj.into())
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsError> {
    Reflect::set(target, &key.into(), value)
        .map(|_| ())
        .map_err(|_| JsError::new(&format!("Failed to set {key} property")))
}
