//! Shared helpers for the WASM bindings
//!
//! Serialization across the JS boundary, error conversion and small DOM
//! utilities used by the page bindings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement};

// ============================================================================
// Error Conversion
// ============================================================================

/// Log an error and turn it into a JS exception value
pub fn to_js_error(context: &str, err: impl Display) -> JsValue {
    let msg = format!("{}: {}", context, err);
    log::error!("{}", msg);
    JsValue::from_str(&msg)
}

/// Log a failed DOM call; DOM mutations inside port methods cannot propagate
pub fn log_dom_error(context: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::error!("{}: {:?}", context, err);
    }
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| to_js_error(error_context, e))
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| to_js_error(error_context, e))
}

// ============================================================================
// DOM Helpers
// ============================================================================

pub fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<web_sys::Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element_by_id<T: JsCast>(id: &str) -> Result<T, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{} not found", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} has an unexpected type", id)))
}

pub fn px(value: f64) -> String {
    format!("{}px", value)
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    log_dom_error(property, element.style().set_property(property, value));
}

/// Event listener kept alive as long as the returned closure is
pub type Listener = Closure<dyn FnMut(Event)>;

pub fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}
