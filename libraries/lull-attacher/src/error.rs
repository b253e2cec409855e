//! Error types for chain construction

use thiserror::Error;

/// Chain construction errors
///
/// None of these are fatal: the element simply keeps playing unprocessed audio.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachError {
    /// No audio context could be created for the page
    #[error("Web Audio is unavailable")]
    AudioUnavailable,

    /// The element refused a media source (e.g. one is already attached)
    #[error("Cannot create media source: {0}")]
    Source(String),

    /// Node creation or wiring failed
    #[error("Cannot build processing chain: {0}")]
    Connect(String),
}

/// Result type for chain construction
pub type Result<T> = std::result::Result<T, AttachError>;
