/// Intensity presets
///
/// Maps settings to the concrete parameters pushed into a
/// `DynamicsCompressorNode` and the `GainNode` behind it.
/// The compression curve itself is the browser's; only parameters live here.
use crate::types::{Intensity, Settings};

/// Compressor and gain parameters for one settings value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorParams {
    /// Threshold in dB
    pub threshold_db: f32,

    /// Compression ratio (N:1)
    pub ratio: f32,

    /// Knee width in dB (`None` leaves the node's value untouched)
    pub knee_db: Option<f32>,

    /// Attack time in seconds (`None` leaves the node's value untouched)
    pub attack_secs: Option<f32>,

    /// Release time in seconds (`None` leaves the node's value untouched)
    pub release_secs: Option<f32>,

    /// Linear gain applied after the compressor
    pub gain: f32,
}

impl CompressorParams {
    /// Gentle compression
    pub const LIGHT: Self = Self {
        threshold_db: -35.0,
        ratio: 6.0,
        knee_db: Some(25.0),
        attack_secs: Some(0.005),
        release_secs: Some(0.3),
        gain: 1.1,
    };

    /// Balanced compression
    pub const MEDIUM: Self = Self {
        threshold_db: -30.0,
        ratio: 12.0,
        knee_db: Some(35.0),
        attack_secs: Some(0.003),
        release_secs: Some(0.25),
        gain: 1.2,
    };

    /// Heavy compression
    pub const STRONG: Self = Self {
        threshold_db: -25.0,
        ratio: 18.0,
        knee_db: Some(40.0),
        attack_secs: Some(0.002),
        release_secs: Some(0.2),
        gain: 1.3,
    };

    /// Neutral pass-through used while the normalizer is disabled
    ///
    /// A 1:1 ratio never reduces gain, so the threshold is irrelevant and
    /// knee/attack/release are left as they were.
    pub const BYPASS: Self = Self {
        threshold_db: -50.0,
        ratio: 1.0,
        knee_db: None,
        attack_secs: None,
        release_secs: None,
        gain: 1.0,
    };

    /// Preset row for an intensity
    pub fn for_intensity(intensity: Intensity) -> Self {
        match intensity {
            Intensity::Light => Self::LIGHT,
            Intensity::Medium => Self::MEDIUM,
            Intensity::Strong => Self::STRONG,
        }
    }

    /// Parameters for a full settings value (bypass when disabled)
    pub fn for_settings(settings: &Settings) -> Self {
        if settings.enabled {
            Self::for_intensity(settings.intensity)
        } else {
            Self::BYPASS
        }
    }
}
