//! Lull - Audio Normalizer
//!
//! WebAssembly build of the extension. One module is loaded in every
//! extension context; each context calls its own entry point:
//!
//! | Context | Loader | Entry point |
//! |---|---|---|
//! | Background service worker | `static/background.js` | `handleInstalled`, `handleMessage` |
//! | Content script (every page) | `static/content.js` | `startContent` |
//! | Popup | `static/popup.js` | `startPopup` |
//!
//! All behaviour lives in the `lull-*` libraries; this crate only binds them
//! to `chrome.*`, the DOM and Web Audio. Everything here is browser-only, so
//! native builds compile it out.

#[cfg(target_arch = "wasm32")]
mod background;
#[cfg(target_arch = "wasm32")]
mod chrome;
#[cfg(target_arch = "wasm32")]
mod content;
#[cfg(target_arch = "wasm32")]
mod popup;

#[cfg(target_arch = "wasm32")]
pub use background::{handle_installed, handle_message};
#[cfg(target_arch = "wasm32")]
pub use content::start_content;
#[cfg(target_arch = "wasm32")]
pub use popup::start_popup;

/// Panic hook and console logging for the current context
#[cfg(target_arch = "wasm32")]
fn init_logging() {
    console_error_panic_hook::set_once();
    // A second call in the same context is harmless
    let _ = tracing_wasm::try_set_as_global_default();
}
