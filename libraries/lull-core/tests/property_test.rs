//! Property-based tests for settings and presets
//!
//! Uses proptest to verify invariants across every settings value.

use lull_core::{CompressorParams, Intensity, Message, Settings};
use proptest::prelude::*;

fn arbitrary_intensity() -> impl Strategy<Value = Intensity> {
    prop_oneof![
        Just(Intensity::Light),
        Just(Intensity::Medium),
        Just(Intensity::Strong),
    ]
}

fn arbitrary_settings() -> impl Strategy<Value = Settings> {
    (any::<bool>(), arbitrary_intensity()).prop_map(|(enabled, intensity)| Settings {
        enabled,
        intensity,
    })
}

proptest! {
    /// Property: enabled settings always map to their intensity row
    #[test]
    fn enabled_settings_use_intensity_row(intensity in arbitrary_intensity()) {
        let params = CompressorParams::for_settings(&Settings::new(true, intensity));
        prop_assert_eq!(params, CompressorParams::for_intensity(intensity));
        prop_assert!(params.knee_db.is_some());
        prop_assert!(params.attack_secs.is_some());
        prop_assert!(params.release_secs.is_some());
    }

    /// Property: disabled settings are neutral whatever the intensity
    #[test]
    fn disabled_settings_are_neutral(intensity in arbitrary_intensity()) {
        let params = CompressorParams::for_settings(&Settings::new(false, intensity));
        prop_assert_eq!(params.threshold_db, -50.0);
        prop_assert_eq!(params.ratio, 1.0);
        prop_assert_eq!(params.gain, 1.0);
    }

    /// Property: every preset stays inside the ranges a DynamicsCompressorNode accepts
    #[test]
    fn presets_within_node_ranges(settings in arbitrary_settings()) {
        let params = CompressorParams::for_settings(&settings);
        prop_assert!((-100.0..=0.0).contains(&params.threshold_db));
        prop_assert!((1.0..=20.0).contains(&params.ratio));
        if let Some(knee) = params.knee_db {
            prop_assert!((0.0..=40.0).contains(&knee));
        }
        if let Some(attack) = params.attack_secs {
            prop_assert!((0.0..=1.0).contains(&attack));
        }
        if let Some(release) = params.release_secs {
            prop_assert!((0.0..=1.0).contains(&release));
        }
        prop_assert!(params.gain >= 1.0);
    }

    /// Property: a state change message carries the settings through JSON intact
    #[test]
    fn state_changed_preserves_settings(settings in arbitrary_settings()) {
        let json = serde_json::to_string(&Message::StateChanged { state: settings }).unwrap();
        let decoded: Message = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, Message::StateChanged { state: settings });
    }
}
