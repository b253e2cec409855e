//! Media attacher state machine
//!
//! Each media element moves `Unattached → Attached` at most once. Attached is
//! terminal: chains are never torn down, even when the element leaves the
//! document. Settings changes only rewrite parameters in place so the audio
//! graph is never reconnected.

use crate::host::MediaHost;
use lull_core::{CompressorParams, Settings};
use tracing::{debug, warn};

/// Result of one attach attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A new chain was built and configured
    Attached,

    /// The element already had a chain; nothing changed
    AlreadyAttached,

    /// Chain construction failed; the element stays unattached
    Failed,
}

/// Per-page attacher
///
/// Holds the page's cached settings, refreshed only through
/// [`on_state_changed`](Self::on_state_changed).
pub struct MediaAttacher<H: MediaHost> {
    host: H,
    settings: Settings,
}

impl<H: MediaHost> MediaAttacher<H> {
    /// Create an attacher with the settings read at page load
    pub fn new(host: H, settings: Settings) -> Self {
        Self { host, settings }
    }

    /// Attach every media element already in the document
    ///
    /// Returns how many new chains were built.
    pub fn on_page_load(&self) -> usize {
        let attached = self.attach_all(self.host.media_elements());
        debug!("Page scan attached {} media element(s)", attached);
        attached
    }

    /// Attach media elements found in one mutation batch
    ///
    /// Nodes are handled in the order reported. Returns how many new chains
    /// were built.
    pub fn on_nodes_added<I>(&self, nodes: I) -> usize
    where
        I: IntoIterator<Item = H::Node>,
    {
        nodes
            .into_iter()
            .map(|node| self.attach_all(self.host.media_within(&node)))
            .sum()
    }

    /// Attach one element (idempotent)
    pub fn attach(&self, element: &H::Element) -> AttachOutcome {
        if self.host.chain_for(element).is_some() {
            return AttachOutcome::AlreadyAttached;
        }

        let chain = match self.host.build_chain(element) {
            Ok(chain) => chain,
            Err(e) => {
                warn!(
                    "Unable to normalize {}: {}",
                    self.host.describe(element),
                    e
                );
                return AttachOutcome::Failed;
            }
        };

        self.apply_settings(&chain, &self.settings);
        self.host.remember_chain(element, chain);
        self.host.mark_attached(element);

        debug!("Normalized audio for {}", self.host.describe(element));
        AttachOutcome::Attached
    }

    /// Push the parameters for `settings` into a chain at the current time
    pub fn apply_settings(&self, chain: &H::Chain, settings: &Settings) {
        let params = CompressorParams::for_settings(settings);
        let now = self.host.current_time();
        self.host.set_params(chain, &params, now);
    }

    /// Cache new settings and re-apply them to every attached element
    ///
    /// Returns how many chains were updated.
    pub fn on_state_changed(&mut self, settings: Settings) -> usize {
        self.settings = settings;

        let mut updated = 0;
        for element in self.host.marked_elements() {
            if let Some(chain) = self.host.chain_for(&element) {
                self.apply_settings(&chain, &self.settings);
                updated += 1;
            }
        }

        debug!(
            "Applied enabled={} intensity={} to {} element(s)",
            settings.enabled, settings.intensity, updated
        );
        updated
    }

    /// Cached settings
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Page integration
    pub fn host(&self) -> &H {
        &self.host
    }

    fn attach_all(&self, elements: Vec<H::Element>) -> usize {
        elements
            .iter()
            .filter(|element| self.attach(element) == AttachOutcome::Attached)
            .count()
    }
}
