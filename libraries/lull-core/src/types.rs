//! Core types for the normalizer settings

use crate::error::LullError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compression intensity preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Gentle compression, small makeup gain
    Light,

    /// Balanced compression (default)
    #[default]
    Medium,

    /// Heavy compression for very dynamic content
    Strong,
}

impl Intensity {
    /// Every preset, in the order the popup shows them
    pub const ALL: [Intensity; 3] = [Intensity::Light, Intensity::Medium, Intensity::Strong];

    /// Wire/storage name ("light" | "medium" | "strong")
    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Medium => "medium",
            Intensity::Strong => "strong",
        }
    }

    /// Human-readable status line for this preset
    pub fn label(self) -> &'static str {
        match self {
            Intensity::Light => "Light normalization",
            Intensity::Medium => "Medium normalization",
            Intensity::Strong => "Strong normalization",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = LullError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Intensity::Light),
            "medium" => Ok(Intensity::Medium),
            "strong" => Ok(Intensity::Strong),
            other => Err(LullError::decode(format!("unknown intensity '{other}'"))),
        }
    }
}

/// Extension settings
///
/// The single persisted record. Missing fields decode to their defaults, so a
/// partially written record still yields a usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether compression is applied at all
    pub enabled: bool,

    /// Which preset to use while enabled
    pub intensity: Intensity,
}

impl Settings {
    /// Create settings from explicit values
    pub fn new(enabled: bool, intensity: Intensity) -> Self {
        Self { enabled, intensity }
    }

    /// Same settings with a different enabled flag
    #[must_use]
    pub fn with_enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }

    /// Same settings with a different intensity
    #[must_use]
    pub fn with_intensity(self, intensity: Intensity) -> Self {
        Self { intensity, ..self }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: Intensity::Medium,
        }
    }
}
