//! Background service worker
//!
//! Manifest V3 requires listeners to be registered synchronously when the
//! worker starts, before the wasm module is ready. `static/background.js`
//! registers them and forwards each event here once initialization settles.

use crate::chrome::{from_js, to_js, ChromeNotifier, ChromeStore};
use js_sys::Reflect;
use lull_core::Message;
use lull_hub::BroadcastHub;
use tracing::warn;
use wasm_bindgen::prelude::*;

fn hub() -> BroadcastHub<ChromeStore, ChromeNotifier> {
    BroadcastHub::new(ChromeStore, ChromeNotifier)
}

/// `chrome.runtime.onInstalled`
///
/// Writes the default settings on a fresh install only; updates and browser
/// updates keep the user's choice.
#[wasm_bindgen(js_name = handleInstalled)]
pub async fn handle_installed(details: JsValue) -> Result<(), JsValue> {
    crate::init_logging();

    let reason = Reflect::get(&details, &JsValue::from_str("reason"))
        .ok()
        .and_then(|r| r.as_string());
    if reason.as_deref() != Some("install") {
        return Ok(());
    }

    hub()
        .on_installed()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `chrome.runtime.onMessage`
///
/// Resolves to the response for `sendResponse`, or `undefined` for messages
/// the hub does not answer.
#[wasm_bindgen(js_name = handleMessage)]
pub async fn handle_message(message: JsValue) -> Result<JsValue, JsValue> {
    crate::init_logging();

    let message: Message = match from_js(message) {
        Ok(message) => message,
        Err(e) => {
            warn!("Ignoring malformed message: {}", e);
            return Ok(JsValue::UNDEFINED);
        }
    };

    let response = hub()
        .handle(message)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    match response {
        Some(response) => to_js(&response).map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(JsValue::UNDEFINED),
    }
}
