//! Lull Core
//!
//! Platform-agnostic types shared by every part of the Lull audio normalizer
//! (background hub, content script and popup).
//!
//! This crate provides:
//! - **Settings**: the persisted `{enabled, intensity}` record and its defaults
//! - **Presets**: the fixed intensity → compressor/gain parameter table
//! - **Protocol**: the `GET_STATE` / `UPDATE_STATE` / `STATE_CHANGED` messages
//! - **Error Handling**: unified `LullError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use lull_core::{CompressorParams, Intensity, Settings};
//!
//! let settings = Settings::default();
//! assert!(settings.enabled);
//! assert_eq!(settings.intensity, Intensity::Medium);
//!
//! let params = CompressorParams::for_settings(&settings);
//! assert_eq!(params.threshold_db, -30.0);
//! assert_eq!(params.gain, 1.2);
//! ```

#![forbid(unsafe_code)]

pub mod constants;
pub mod error;
pub mod message;
pub mod preset;
pub mod types;

// Re-export commonly used types
pub use error::{LullError, Result};
pub use message::{Message, Response, UpdateAck};
pub use preset::CompressorParams;
pub use types::{Intensity, Settings};
