//! Lull - Settings Popup
//!
//! Controller and view model behind the extension's popup: an enable toggle,
//! three intensity buttons and a status line.
//!
//! The hub connection ([`HubClient`]) and DOM drawing ([`PopupRenderer`]) are
//! supplied by the extension, so the popup's behaviour is testable without a
//! browser.

mod controller;
mod view;

pub use controller::{HubClient, PopupConfig, PopupController, PopupRenderer};
pub use view::{
    IntensityButton, PopupModel, PopupView, SaveTicket, StatusLine, DISABLED_TEXT, SAVED_TEXT,
};
