/// Page integration trait
///
/// Everything the attacher needs from the page: DOM queries, the element →
/// chain registry and the Web Audio graph.
use crate::error::Result;
use lull_core::CompressorParams;

/// DOM and Web Audio access for one page
///
/// Implementers own the page's single audio context. Handles are cheap
/// clones of platform objects (JS references in the browser).
pub trait MediaHost {
    /// A media element (`<video>` / `<audio>`)
    type Element;

    /// A DOM node reported by mutation observation
    type Node;

    /// A built source → compressor → gain → destination chain
    type Chain;

    // ========================================================================
    // Document
    // ========================================================================

    /// Every media element currently in the document
    fn media_elements(&self) -> Vec<Self::Element>;

    /// Media elements inside an inserted node
    ///
    /// The node itself if it is a media element, otherwise every media
    /// element in its subtree.
    fn media_within(&self, node: &Self::Node) -> Vec<Self::Element>;

    /// Media elements in the document that carry the attached marker
    fn marked_elements(&self) -> Vec<Self::Element>;

    /// Set the attached marker on an element
    fn mark_attached(&self, element: &Self::Element);

    /// Short description for log lines (usually the media URL)
    fn describe(&self, element: &Self::Element) -> String;

    // ========================================================================
    // Registry
    // ========================================================================

    /// Chain previously built for this element (identity lookup)
    fn chain_for(&self, element: &Self::Element) -> Option<Self::Chain>;

    /// Associate a chain with an element without extending its lifetime
    fn remember_chain(&self, element: &Self::Element, chain: Self::Chain);

    // ========================================================================
    // Audio graph
    // ========================================================================

    /// Build and connect a chain for an element
    ///
    /// # Errors
    /// Fails if there is no audio context, or the element already feeds
    /// another source node.
    fn build_chain(&self, element: &Self::Element) -> Result<Self::Chain>;

    /// Current time of the page's audio context, in seconds
    fn current_time(&self) -> f64;

    /// Schedule parameter values on a chain at `at` seconds
    ///
    /// Fields that are `None` are left unchanged.
    fn set_params(&self, chain: &Self::Chain, params: &CompressorParams, at: f64);
}
