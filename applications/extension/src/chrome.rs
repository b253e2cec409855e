//! `chrome.*` bindings
//!
//! Promise-returning Manifest V3 APIs, wrapped in the store, messenger and
//! hub-client traits of the `lull-*` libraries.

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use lull_core::{LullError, Message, Result, Settings, UpdateAck};
use lull_hub::{fan_out, SettingsStore, StateNotifier, TabId, TabMessenger};
use lull_popup::HubClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    fn storage_local_get(defaults: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn storage_local_set(items: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    fn runtime_send_message(message: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    fn runtime_on_message_add_listener(callback: &Function);

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
    fn tabs_send_message(tab_id: TabId, message: &JsValue) -> std::result::Result<Promise, JsValue>;
}

// ===== Conversions =====

/// Best human-readable text for a thrown JS value
pub(crate) fn js_error_text(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Serialize to a plain JS object
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| LullError::decode(e.to_string()))
}

/// Deserialize from a JS value
pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| LullError::decode(e.to_string()))
}

async fn settle(
    promise: std::result::Result<Promise, JsValue>,
) -> std::result::Result<JsValue, String> {
    let promise = promise.map_err(|e| js_error_text(&e))?;
    JsFuture::from(promise).await.map_err(|e| js_error_text(&e))
}

// ===== Storage =====

/// `chrome.storage.local`
///
/// Reads pass the defaults as the key set, so missing keys come back filled.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ChromeStore;

#[async_trait(?Send)]
impl SettingsStore for ChromeStore {
    async fn load(&self) -> Result<Settings> {
        let defaults = to_js(&Settings::default())?;
        let value = settle(storage_local_get(&defaults))
            .await
            .map_err(LullError::storage)?;
        from_js(value)
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let items = to_js(settings)?;
        settle(storage_local_set(&items))
            .await
            .map(|_| ())
            .map_err(LullError::storage)
    }
}

// ===== Messaging =====

/// Register a `chrome.runtime.onMessage` listener that never answers
///
/// The closure lives for the rest of the context.
pub(crate) fn on_message<F>(mut handler: F)
where
    F: FnMut(Message) + 'static,
{
    let callback = Closure::wrap(Box::new(move |message: JsValue| -> JsValue {
        if let Ok(message) = from_js::<Message>(message) {
            handler(message);
        }
        JsValue::FALSE
    }) as Box<dyn FnMut(JsValue) -> JsValue>);

    runtime_on_message_add_listener(callback.as_ref().unchecked_ref());
    callback.forget();
}

/// Popup side of the hub protocol over `chrome.runtime.sendMessage`
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ChromeHubClient;

impl ChromeHubClient {
    async fn request(&self, message: &Message) -> Result<JsValue> {
        let message = to_js(message)?;
        settle(runtime_send_message(&message))
            .await
            .map_err(LullError::messaging)
    }
}

#[async_trait(?Send)]
impl HubClient for ChromeHubClient {
    async fn get_state(&self) -> Result<Settings> {
        from_js(self.request(&Message::GetState).await?)
    }

    async fn update_state(&self, settings: Settings) -> Result<UpdateAck> {
        from_js(self.request(&Message::UpdateState { state: settings }).await?)
    }
}

/// `chrome.tabs`
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ChromeTabs;

#[async_trait(?Send)]
impl TabMessenger for ChromeTabs {
    async fn open_tabs(&self) -> Result<Vec<Option<TabId>>> {
        let tabs = settle(tabs_query(&js_sys::Object::new()))
            .await
            .map_err(LullError::messaging)?;

        Ok(Array::from(&tabs)
            .iter()
            .map(|tab| {
                Reflect::get(&tab, &JsValue::from_str("id"))
                    .ok()
                    .and_then(|id| id.as_f64())
                    .map(|id| id as TabId)
            })
            .collect())
    }

    async fn send_to_tab(&self, tab: TabId, message: &Message) -> Result<()> {
        let message = to_js(message)?;
        settle(tabs_send_message(tab, &message))
            .await
            .map(|_| ())
            .map_err(LullError::messaging)
    }
}

/// Detached fan-out over [`ChromeTabs`]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ChromeNotifier;

impl StateNotifier for ChromeNotifier {
    fn notify_all(&self, message: Message) {
        spawn_local(async move {
            fan_out(&ChromeTabs, &message).await;
        });
    }
}
