/// Core error types for Lull
use thiserror::Error;

/// Result type alias using `LullError`
pub type Result<T> = std::result::Result<T, LullError>;

/// Core error type for Lull
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LullError {
    /// A message or stored record could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Settings storage rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Extension message bus failure
    #[error("Messaging error: {0}")]
    Messaging(String),
}

impl LullError {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a messaging error
    pub fn messaging(msg: impl Into<String>) -> Self {
        Self::Messaging(msg.into())
    }
}
