//! Content script
//!
//! One [`MediaAttacher`] per page over a `web-sys` [`MediaHost`]. Chains are
//! kept in a JS `WeakMap` keyed by the element, so a removed element and its
//! nodes are collected together.

use crate::chrome::{js_error_text, on_message, ChromeStore};
use js_sys::{Array, WeakMap};
use lull_attacher::{AttachError, AttacherConfig, MediaAttacher, MediaHost};
use lull_core::{CompressorParams, Message, Settings};
use lull_hub::SettingsStore;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AudioContext, AudioContextState, AudioParam, Document, DynamicsCompressorNode, Element,
    GainNode, HtmlMediaElement, MediaElementAudioSourceNode, MutationObserver,
    MutationObserverInit, MutationRecord, Node, NodeList,
};

/// Nodes wired for one element
pub(crate) struct MediaChain {
    source: MediaElementAudioSourceNode,
    compressor: DynamicsCompressorNode,
    gain: GainNode,
}

impl MediaChain {
    fn to_array(&self) -> Array {
        Array::of3(&self.source, &self.compressor, &self.gain)
    }

    fn from_array(nodes: &Array) -> Self {
        Self {
            source: nodes.get(0).unchecked_into(),
            compressor: nodes.get(1).unchecked_into(),
            gain: nodes.get(2).unchecked_into(),
        }
    }
}

/// The page's DOM and its single audio context
pub(crate) struct WebMediaHost {
    document: Document,
    context: Option<AudioContext>,
    chains: WeakMap,
    config: AttacherConfig,
    resume_on_play: Closure<dyn FnMut()>,
}

impl WebMediaHost {
    fn new(document: Document, context: Option<AudioContext>, config: AttacherConfig) -> Self {
        // Autoplay policy may start the context suspended; a source node on a
        // suspended context is silent, so wake it when playback starts.
        let waker = context.clone();
        let resume_on_play = Closure::wrap(Box::new(move || {
            if let Some(context) = &waker {
                resume_if_suspended(context);
            }
        }) as Box<dyn FnMut()>);

        Self {
            document,
            context,
            chains: WeakMap::new(),
            config,
            resume_on_play,
        }
    }

    fn media_in(&self, list: std::result::Result<NodeList, JsValue>) -> Vec<HtmlMediaElement> {
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlMediaElement>().ok())
            .collect()
    }

    fn schedule(param: &AudioParam, value: f32, at: f64) {
        if let Err(e) = param.set_value_at_time(value, at) {
            warn!("Could not schedule parameter: {}", js_error_text(&e));
        }
    }
}

fn resume_if_suspended(context: &AudioContext) {
    if context.state() != AudioContextState::Suspended {
        return;
    }
    if let Err(e) = context.resume() {
        warn!("Could not resume audio context: {}", js_error_text(&e));
    }
}

impl MediaHost for WebMediaHost {
    type Element = HtmlMediaElement;
    type Node = Node;
    type Chain = MediaChain;

    fn media_elements(&self) -> Vec<HtmlMediaElement> {
        self.media_in(self.document.query_selector_all(&self.config.media_selector))
    }

    fn media_within(&self, node: &Node) -> Vec<HtmlMediaElement> {
        let Some(element) = node.dyn_ref::<Element>() else {
            return Vec::new();
        };
        if self.config.is_media_tag(&element.tag_name()) {
            return element
                .clone()
                .dyn_into::<HtmlMediaElement>()
                .map(|media| vec![media])
                .unwrap_or_default();
        }
        self.media_in(element.query_selector_all(&self.config.media_selector))
    }

    fn marked_elements(&self) -> Vec<HtmlMediaElement> {
        self.media_in(
            self.document
                .query_selector_all(&self.config.attached_selector()),
        )
    }

    fn mark_attached(&self, element: &HtmlMediaElement) {
        if let Err(e) =
            element.set_attribute(&self.config.marker_attribute, &self.config.marker_value)
        {
            warn!("Could not mark media element: {}", js_error_text(&e));
        }
    }

    fn describe(&self, element: &HtmlMediaElement) -> String {
        let src = element.current_src();
        if src.is_empty() {
            element.src()
        } else {
            src
        }
    }

    fn chain_for(&self, element: &HtmlMediaElement) -> Option<MediaChain> {
        let nodes = self.chains.get(element);
        if nodes.is_undefined() {
            return None;
        }
        Some(MediaChain::from_array(nodes.unchecked_ref()))
    }

    fn remember_chain(&self, element: &HtmlMediaElement, chain: MediaChain) {
        self.chains.set(element, &chain.to_array());
    }

    fn build_chain(&self, element: &HtmlMediaElement) -> lull_attacher::Result<MediaChain> {
        let context = self.context.as_ref().ok_or(AttachError::AudioUnavailable)?;
        let connect = |e: JsValue| AttachError::Connect(js_error_text(&e));

        let source = context
            .create_media_element_source(element)
            .map_err(|e| AttachError::Source(js_error_text(&e)))?;
        let compressor = context.create_dynamics_compressor().map_err(connect)?;
        let gain = context.create_gain().map_err(connect)?;

        source.connect_with_audio_node(&compressor).map_err(connect)?;
        compressor.connect_with_audio_node(&gain).map_err(connect)?;
        gain.connect_with_audio_node(&context.destination())
            .map_err(connect)?;

        let on_play: &js_sys::Function = self.resume_on_play.as_ref().unchecked_ref();
        if let Err(e) = element.add_event_listener_with_callback("play", on_play) {
            warn!("Could not watch playback: {}", js_error_text(&e));
        }
        if !element.paused() {
            resume_if_suspended(context);
        }

        Ok(MediaChain {
            source,
            compressor,
            gain,
        })
    }

    fn current_time(&self) -> f64 {
        self.context.as_ref().map_or(0.0, |context| context.current_time())
    }

    fn set_params(&self, chain: &MediaChain, params: &CompressorParams, at: f64) {
        let compressor = &chain.compressor;
        Self::schedule(&compressor.threshold(), params.threshold_db, at);
        Self::schedule(&compressor.ratio(), params.ratio, at);
        if let Some(knee) = params.knee_db {
            Self::schedule(&compressor.knee(), knee, at);
        }
        if let Some(attack) = params.attack_secs {
            Self::schedule(&compressor.attack(), attack, at);
        }
        if let Some(release) = params.release_secs {
            Self::schedule(&compressor.release(), release, at);
        }
        Self::schedule(&chain.gain.gain(), params.gain, at);
    }
}

type SharedAttacher = Rc<RefCell<MediaAttacher<WebMediaHost>>>;

/// Content script entry point
///
/// Reads settings straight from storage, attaches existing media, then keeps
/// watching the page and the hub for the rest of its lifetime.
#[wasm_bindgen(js_name = startContent)]
pub async fn start_content() -> Result<(), JsValue> {
    crate::init_logging();

    let settings = ChromeStore.load().await.unwrap_or_else(|e| {
        warn!("Settings read failed, using defaults: {}", e);
        Settings::default()
    });

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let context = match AudioContext::new() {
        Ok(context) => Some(context),
        Err(e) => {
            warn!("Web Audio unavailable: {}", js_error_text(&e));
            None
        }
    };

    let host = WebMediaHost::new(document.clone(), context, AttacherConfig::default());
    let attacher: SharedAttacher = Rc::new(RefCell::new(MediaAttacher::new(host, settings)));

    attacher.borrow().on_page_load();
    observe_insertions(&document, Rc::clone(&attacher))?;
    listen_for_state_changes(attacher);

    Ok(())
}

fn observe_insertions(document: &Document, attacher: SharedAttacher) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(move |records: Array, _observer: MutationObserver| {
        let added = records.iter().flat_map(|record| {
            let list = record.unchecked_into::<MutationRecord>().added_nodes();
            (0..list.length())
                .filter_map(move |i| list.get(i))
                .collect::<Vec<_>>()
        });
        attacher.borrow().on_nodes_added(added);
    }) as Box<dyn FnMut(Array, MutationObserver)>);

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);

    let target: Node = match document.body() {
        Some(body) => body.into(),
        None => document.clone().into(),
    };
    observer.observe_with_options(&target, &init)?;

    // Observation lasts as long as the page
    callback.forget();
    Ok(())
}

fn listen_for_state_changes(attacher: SharedAttacher) {
    on_message(move |message| {
        if let Message::StateChanged { state } = message {
            attacher.borrow_mut().on_state_changed(state);
        }
    });
}
