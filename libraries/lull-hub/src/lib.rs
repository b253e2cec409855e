//! Lull - Broadcast Hub
//!
//! Background-worker logic for the Lull audio normalizer.
//!
//! This crate provides:
//! - `GET_STATE` / `UPDATE_STATE` handling over a pluggable settings store
//! - Install-time initialization of the settings record
//! - Best-effort `STATE_CHANGED` fan-out to every open tab
//!
//! # Architecture
//!
//! `lull-hub` has no browser dependency. The extension supplies:
//! - a [`SettingsStore`] backed by `chrome.storage.local`
//! - a [`StateNotifier`] that spawns [`fan_out`] over a [`TabMessenger`]
//!   backed by `chrome.tabs`
//!
//! # Example
//!
//! ```rust
//! use lull_core::{Intensity, Message, Settings};
//! use lull_hub::{BroadcastHub, MemoryStore, StateNotifier};
//!
//! struct Quiet;
//! impl StateNotifier for Quiet {
//!     fn notify_all(&self, _message: Message) {}
//! }
//!
//! # futures::executor::block_on(async {
//! let hub = BroadcastHub::new(MemoryStore::new(), Quiet);
//! assert_eq!(hub.get_state().await, Settings::default());
//!
//! hub.update_state(Settings::new(true, Intensity::Strong)).await.unwrap();
//! assert_eq!(hub.get_state().await.intensity, Intensity::Strong);
//! # });
//! ```

mod broadcast;
mod hub;
mod store;

// Public exports
pub use broadcast::{fan_out, FanOutReport, StateNotifier, TabId, TabMessenger};
pub use hub::BroadcastHub;
pub use store::{MemoryStore, SettingsStore};
