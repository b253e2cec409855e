//! Property-based tests for the media attacher
//!
//! Uses proptest to verify invariants across random settings histories and
//! attach sequences.

mod common;

use common::{Element, FakePage, NodeParams};
use lull_attacher::MediaAttacher;
use lull_core::{CompressorParams, Intensity, Settings};
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_settings() -> impl Strategy<Value = Settings> {
    (
        any::<bool>(),
        prop_oneof![
            Just(Intensity::Light),
            Just(Intensity::Medium),
            Just(Intensity::Strong),
        ],
    )
        .prop_map(|(enabled, intensity)| Settings::new(enabled, intensity))
}

fn arbitrary_node_params() -> impl Strategy<Value = NodeParams> {
    (
        -100.0f32..0.0,
        1.0f32..20.0,
        0.0f32..40.0,
        0.0f32..1.0,
        0.0f32..1.0,
        0.0f32..2.0,
    )
        .prop_map(|(threshold, ratio, knee, attack, release, gain)| NodeParams {
            threshold,
            ratio,
            knee,
            attack,
            release,
            gain,
        })
}

// ===== Property Tests =====

proptest! {
    /// Property: after any history of changes, a chain holds exactly the row
    /// for the last settings, whatever values the nodes held before
    #[test]
    fn last_settings_win(
        history in prop::collection::vec(arbitrary_settings(), 1..20),
        prior in arbitrary_node_params(),
    ) {
        let page = FakePage::new();
        let video = Element::video("p.mp4");
        page.body.append(&video);

        let mut attacher = MediaAttacher::new(page, Settings::default());
        attacher.on_page_load();
        let chain = attacher.host().chain(&video).unwrap();
        chain.scribble(prior);

        for settings in &history {
            attacher.on_state_changed(*settings);
        }

        let last = *history.last().unwrap();
        let expected = CompressorParams::for_settings(&last);
        let params = chain.params();
        prop_assert_eq!(params.threshold, expected.threshold_db);
        prop_assert_eq!(params.ratio, expected.ratio);
        prop_assert_eq!(params.gain, expected.gain);
        if last.enabled {
            prop_assert_eq!(Some(params.knee), expected.knee_db);
            prop_assert_eq!(Some(params.attack), expected.attack_secs);
            prop_assert_eq!(Some(params.release), expected.release_secs);
        }
        prop_assert_eq!(attacher.host().chains_built(), 1);
    }

    /// Property: any number of attach calls on any elements builds one chain per element
    #[test]
    fn one_chain_per_element(
        element_count in 1usize..8,
        attempts in prop::collection::vec(0usize..8, 0..40),
    ) {
        let page = FakePage::new();
        let elements: Vec<Element> = (0..element_count)
            .map(|i| Element::video(&format!("v{i}.mp4")))
            .collect();
        for element in &elements {
            page.body.append(element);
        }

        let attacher = MediaAttacher::new(page, Settings::default());
        for index in &attempts {
            attacher.attach(&elements[index % element_count]);
        }
        attacher.on_page_load();

        prop_assert_eq!(attacher.host().chains_built(), element_count);
        prop_assert!(elements.iter().all(Element::is_marked));
    }
}
