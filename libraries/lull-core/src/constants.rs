//! Wire and DOM constants shared between the extension contexts

/// `data-*` attribute set on every media element that has a processing chain
pub const MARKER_ATTRIBUTE: &str = "data-audio-normalized";

/// Value written to [`MARKER_ATTRIBUTE`]
pub const MARKER_VALUE: &str = "true";

/// Media elements the content script processes
pub const MEDIA_SELECTOR: &str = "video, audio";

/// How long the popup shows its save confirmation (milliseconds)
pub const SAVED_STATUS_MS: u32 = 2000;
