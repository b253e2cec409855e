//! Settings popup
//!
//! Binds `popup.html` to a [`PopupController`]: `#enableToggle`,
//! `.intensity-btn[data-intensity]` buttons and `#statusText`.

use crate::chrome::{js_error_text, ChromeHubClient};
use lull_core::Intensity;
use lull_popup::{PopupConfig, PopupController, PopupRenderer, PopupView, SaveTicket};
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

/// Popup controls
pub(crate) struct DomRenderer {
    toggle: HtmlInputElement,
    buttons: Vec<(Intensity, HtmlButtonElement)>,
    status_text: HtmlElement,
}

impl DomRenderer {
    fn from_document(document: &Document) -> Result<Self, JsValue> {
        let toggle = find::<HtmlInputElement>(document, "enableToggle")?;
        let status_text = find::<HtmlElement>(document, "statusText")?;

        let list = document.query_selector_all(".intensity-btn")?;
        let buttons = (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlButtonElement>().ok())
            .filter_map(|button| {
                let intensity = button
                    .dataset()
                    .get("intensity")?
                    .parse::<Intensity>()
                    .ok()?;
                Some((intensity, button))
            })
            .collect();

        Ok(Self {
            toggle,
            buttons,
            status_text,
        })
    }
}

fn find<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("popup is missing #{id}")))
}

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        warn!("Could not toggle .{}: {}", class, js_error_text(&e));
    }
}

impl PopupRenderer for DomRenderer {
    fn render(&self, view: &PopupView) {
        self.toggle.set_checked(view.toggle_checked);

        for (intensity, button) in &self.buttons {
            let state = view.button(*intensity);
            set_class(button, "active", state.selected);
            button.set_disabled(state.disabled);
        }

        self.status_text.set_text_content(Some(view.status.text));
        if let Some(container) = self.status_text.parent_element() {
            set_class(&container, "active", view.status.active);
            set_class(&container, "success", view.status.success);
        }
    }
}

type Popup = Rc<PopupController<ChromeHubClient, DomRenderer>>;

/// Popup entry point
#[wasm_bindgen(js_name = startPopup)]
pub async fn start_popup() -> Result<(), JsValue> {
    crate::init_logging();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let renderer = DomRenderer::from_document(&document)?;
    let popup: Popup = Rc::new(PopupController::new(
        ChromeHubClient,
        renderer,
        PopupConfig::default(),
    ));

    popup.open().await;
    bind_toggle(&popup)?;
    bind_intensity_buttons(&popup)?;

    Ok(())
}

fn bind_toggle(popup: &Popup) -> Result<(), JsValue> {
    let toggle = popup.renderer().toggle.clone();
    let handler = {
        let popup = Rc::clone(popup);
        let toggle = toggle.clone();
        Closure::wrap(Box::new(move || {
            let popup = Rc::clone(&popup);
            let enabled = toggle.checked();
            spawn_local(async move {
                if let Some(ticket) = popup.set_enabled(enabled).await {
                    schedule_expiry(popup, ticket);
                }
            });
        }) as Box<dyn FnMut()>)
    };

    toggle.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn bind_intensity_buttons(popup: &Popup) -> Result<(), JsValue> {
    for (intensity, button) in &popup.renderer().buttons {
        let intensity = *intensity;
        let handler = {
            let popup = Rc::clone(popup);
            Closure::wrap(Box::new(move || {
                let popup = Rc::clone(&popup);
                spawn_local(async move {
                    if let Some(ticket) = popup.select_intensity(intensity).await {
                        schedule_expiry(popup, ticket);
                    }
                });
            }) as Box<dyn FnMut()>)
        };

        button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }
    Ok(())
}

/// Revert the status line once the confirmation window is over
fn schedule_expiry(popup: Popup, ticket: SaveTicket) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let delay = i32::try_from(popup.config().saved_status_duration.as_millis())
        .unwrap_or(i32::MAX);
    let callback = Closure::once_into_js(move || popup.expire_status(ticket));

    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
    {
        warn!("Could not schedule status reset: {}", js_error_text(&e));
    }
}
