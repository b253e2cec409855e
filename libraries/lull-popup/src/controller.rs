//! Popup controller
//!
//! Reads state from the hub on open and writes through it on every change.
//! The model is re-rendered immediately on input, then again when the hub
//! acknowledges the save.

use crate::view::{PopupModel, PopupView, SaveTicket};
use async_trait::async_trait;
use lull_core::constants::SAVED_STATUS_MS;
use lull_core::{Intensity, Result, Settings, UpdateAck};
use std::cell::RefCell;
use std::time::Duration;
use tracing::warn;

/// Request side of the hub protocol
#[async_trait(?Send)]
pub trait HubClient {
    /// `GET_STATE`
    async fn get_state(&self) -> Result<Settings>;

    /// `UPDATE_STATE`
    async fn update_state(&self, settings: Settings) -> Result<UpdateAck>;
}

/// Draws a view into the popup document
pub trait PopupRenderer {
    fn render(&self, view: &PopupView);
}

/// Popup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupConfig {
    /// How long "Saved settings" stays up
    pub saved_status_duration: Duration,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            saved_status_duration: Duration::from_millis(u64::from(SAVED_STATUS_MS)),
        }
    }
}

/// Popup controller
///
/// Methods take `&self` so one controller can be shared by every event
/// handler; the model borrow is never held across an `.await`.
pub struct PopupController<C, R> {
    client: C,
    renderer: R,
    model: RefCell<PopupModel>,
    config: PopupConfig,
}

impl<C: HubClient, R: PopupRenderer> PopupController<C, R> {
    /// Create a controller showing the defaults until [`open`](Self::open)
    pub fn new(client: C, renderer: R, config: PopupConfig) -> Self {
        Self {
            client,
            renderer,
            model: RefCell::new(PopupModel::default()),
            config,
        }
    }

    /// Load state from the hub and render it
    pub async fn open(&self) {
        match self.client.get_state().await {
            Ok(settings) => self.model.borrow_mut().load(settings),
            Err(e) => warn!("Could not read settings from hub: {}", e),
        }
        self.render();
    }

    /// Enable toggle changed
    ///
    /// Returns the ticket of the save confirmation, if the hub acknowledged.
    pub async fn set_enabled(&self, enabled: bool) -> Option<SaveTicket> {
        let settings = self.model.borrow_mut().set_enabled(enabled);
        self.save(settings).await
    }

    /// Intensity button clicked
    ///
    /// Returns the ticket of the save confirmation, if the hub acknowledged.
    pub async fn select_intensity(&self, intensity: Intensity) -> Option<SaveTicket> {
        let settings = self.model.borrow_mut().set_intensity(intensity);
        self.save(settings).await
    }

    /// Save confirmation timer fired
    pub fn expire_status(&self, ticket: SaveTicket) {
        if self.model.borrow_mut().expire(ticket) {
            self.render();
        }
    }

    /// Current view
    pub fn view(&self) -> PopupView {
        self.model.borrow().view()
    }

    /// Local settings
    pub fn settings(&self) -> Settings {
        self.model.borrow().settings()
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    async fn save(&self, settings: Settings) -> Option<SaveTicket> {
        self.render();

        match self.client.update_state(settings).await {
            Ok(ack) if ack.success => {
                let ticket = self.model.borrow_mut().mark_saved();
                self.render();
                Some(ticket)
            }
            Ok(_) => {
                warn!("Hub refused settings update");
                None
            }
            Err(e) => {
                warn!("Could not save settings: {}", e);
                None
            }
        }
    }

    fn render(&self) {
        let view = self.model.borrow().view();
        self.renderer.render(&view);
    }
}
