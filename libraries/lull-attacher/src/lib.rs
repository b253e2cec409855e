//! Lull - Media Attacher
//!
//! Content-script logic for the Lull audio normalizer: discovers media
//! elements on a page and routes each through a compressor + gain chain.
//!
//! This crate provides:
//! - Idempotent per-element chain attachment
//! - Handling of mutation batches (including nested inserted media)
//! - In-place re-application of settings on `STATE_CHANGED`
//!
//! # Architecture
//!
//! `lull-attacher` is platform-agnostic. DOM queries, the weak element →
//! chain registry and Web Audio node construction come from a [`MediaHost`]
//! implementation; the extension provides one over `web-sys`.
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌──────────┐    ┌─────────────┐
//! │ <video>     │ ─► │ Compressor   │ ─► │ Gain     │ ─► │ Destination │
//! │ source node │    │ (preset)     │    │ (preset) │    │             │
//! └─────────────┘    └──────────────┘    └──────────┘    └─────────────┘
//! ```

mod attacher;
mod config;
mod error;
mod host;

pub use attacher::{AttachOutcome, MediaAttacher};
pub use config::AttacherConfig;
pub use error::{AttachError, Result};
pub use host::MediaHost;
