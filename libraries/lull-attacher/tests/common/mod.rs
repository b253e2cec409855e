//! In-memory page used by the attacher tests
//!
//! Models just enough of the DOM (a tree of tagged elements) and of Web Audio
//! (chains with compressor/gain parameters) to observe the attacher.

#![allow(dead_code)]

use lull_attacher::{AttachError, AttacherConfig, MediaHost};
use lull_core::CompressorParams;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

// ===== DOM =====

pub struct ElementData {
    tag: String,
    src: String,
    marked: Cell<bool>,
    has_source: Cell<bool>,
    children: RefCell<Vec<Element>>,
}

/// Element handle; clones share identity
#[derive(Clone)]
pub struct Element(Rc<ElementData>);

impl Element {
    pub fn new(tag: &str) -> Self {
        Self::with_src(tag, "")
    }

    pub fn with_src(tag: &str, src: &str) -> Self {
        Element(Rc::new(ElementData {
            tag: tag.to_uppercase(),
            src: src.to_string(),
            marked: Cell::new(false),
            has_source: Cell::new(false),
            children: RefCell::new(Vec::new()),
        }))
    }

    pub fn video(src: &str) -> Self {
        Self::with_src("video", src)
    }

    pub fn audio(src: &str) -> Self {
        Self::with_src("audio", src)
    }

    /// Append a child and return self for chaining
    pub fn append(&self, child: &Element) -> &Self {
        self.0.children.borrow_mut().push(child.clone());
        self
    }

    /// Detach a child from this element
    pub fn remove(&self, child: &Element) {
        self.0
            .children
            .borrow_mut()
            .retain(|c| !Rc::ptr_eq(&c.0, &child.0));
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn is_marked(&self) -> bool {
        self.0.marked.get()
    }

    /// Pretend some other script already created a source for this element
    pub fn take_source(&self) {
        self.0.has_source.set(true);
    }

    pub fn same(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> Weak<ElementData> {
        Rc::downgrade(&self.0)
    }

    /// Every element below this one, depth first
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        for child in self.0.children.borrow().iter() {
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }
}

// ===== Audio graph =====

/// Parameter values as a DynamicsCompressorNode + GainNode would hold them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeParams {
    pub threshold: f32,
    pub ratio: f32,
    pub knee: f32,
    pub attack: f32,
    pub release: f32,
    pub gain: f32,
}

impl Default for NodeParams {
    // Web Audio defaults for freshly created nodes
    fn default() -> Self {
        Self {
            threshold: -24.0,
            ratio: 12.0,
            knee: 30.0,
            attack: 0.003,
            release: 0.25,
            gain: 1.0,
        }
    }
}

pub struct ChainData {
    pub id: usize,
    pub params: RefCell<NodeParams>,
    pub scheduled_at: RefCell<Vec<f64>>,
}

/// Chain handle; clones share identity
#[derive(Clone)]
pub struct Chain(pub Rc<ChainData>);

impl Chain {
    pub fn id(&self) -> usize {
        self.0.id
    }

    pub fn params(&self) -> NodeParams {
        *self.0.params.borrow()
    }

    pub fn scheduled_at(&self) -> Vec<f64> {
        self.0.scheduled_at.borrow().clone()
    }

    /// Overwrite parameters as if another script had touched the nodes
    pub fn scribble(&self, params: NodeParams) {
        *self.0.params.borrow_mut() = params;
    }
}

// ===== Host =====

pub struct FakePage {
    pub body: Element,
    config: AttacherConfig,
    audio_available: bool,
    chains: RefCell<Vec<(Weak<ElementData>, Chain)>>,
    built: Cell<usize>,
    clock: Cell<f64>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
            config: AttacherConfig::default(),
            audio_available: true,
            chains: RefCell::new(Vec::new()),
            built: Cell::new(0),
            clock: Cell::new(0.0),
        }
    }

    /// A page whose audio context could not be created
    pub fn without_audio() -> Self {
        Self {
            audio_available: false,
            ..Self::new()
        }
    }

    pub fn chains_built(&self) -> usize {
        self.built.get()
    }

    pub fn advance_clock(&self, secs: f64) {
        self.clock.set(self.clock.get() + secs);
    }

    /// Chain registered for an element, if any
    pub fn chain(&self, element: &Element) -> Option<Chain> {
        self.chain_for(element)
    }

    fn is_media(&self, element: &Element) -> bool {
        self.config.is_media_tag(element.tag())
    }
}

impl MediaHost for FakePage {
    type Element = Element;
    type Node = Element;
    type Chain = Chain;

    fn media_elements(&self) -> Vec<Element> {
        self.body
            .descendants()
            .into_iter()
            .filter(|e| self.is_media(e))
            .collect()
    }

    fn media_within(&self, node: &Element) -> Vec<Element> {
        if self.is_media(node) {
            return vec![node.clone()];
        }
        node.descendants()
            .into_iter()
            .filter(|e| self.is_media(e))
            .collect()
    }

    fn marked_elements(&self) -> Vec<Element> {
        self.media_elements()
            .into_iter()
            .filter(Element::is_marked)
            .collect()
    }

    fn mark_attached(&self, element: &Element) {
        element.0.marked.set(true);
    }

    fn describe(&self, element: &Element) -> String {
        format!("{} {}", element.tag().to_lowercase(), element.0.src)
    }

    fn chain_for(&self, element: &Element) -> Option<Chain> {
        self.chains
            .borrow()
            .iter()
            .find(|(weak, _)| std::ptr::eq(weak.as_ptr(), Rc::as_ptr(&element.0)))
            .map(|(_, chain)| chain.clone())
    }

    fn remember_chain(&self, element: &Element, chain: Chain) {
        self.chains.borrow_mut().push((element.downgrade(), chain));
    }

    fn build_chain(&self, element: &Element) -> Result<Chain, AttachError> {
        if !self.audio_available {
            return Err(AttachError::AudioUnavailable);
        }
        if element.0.has_source.get() {
            return Err(AttachError::Source(
                "element already connected to a MediaElementSourceNode".to_string(),
            ));
        }

        element.take_source();
        let id = self.built.get() + 1;
        self.built.set(id);

        Ok(Chain(Rc::new(ChainData {
            id,
            params: RefCell::new(NodeParams::default()),
            scheduled_at: RefCell::new(Vec::new()),
        })))
    }

    fn current_time(&self) -> f64 {
        self.clock.get()
    }

    fn set_params(&self, chain: &Chain, params: &CompressorParams, at: f64) {
        let mut node = chain.0.params.borrow_mut();
        node.threshold = params.threshold_db;
        node.ratio = params.ratio;
        if let Some(knee) = params.knee_db {
            node.knee = knee;
        }
        if let Some(attack) = params.attack_secs {
            node.attack = attack;
        }
        if let Some(release) = params.release_secs {
            node.release = release;
        }
        node.gain = params.gain;
        chain.0.scheduled_at.borrow_mut().push(at);
    }
}
