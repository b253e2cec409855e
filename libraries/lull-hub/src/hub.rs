//! Background message handling

use crate::broadcast::StateNotifier;
use crate::store::SettingsStore;
use lull_core::{Message, Response, Result, Settings, UpdateAck};
use tracing::{debug, info, warn};

/// Broadcast hub
///
/// Owns the settings record. Serves reads, persists writes and notifies
/// every open page after each write.
pub struct BroadcastHub<S, N> {
    store: S,
    notifier: N,
}

impl<S: SettingsStore, N: StateNotifier> BroadcastHub<S, N> {
    /// Create a hub over a store and a notifier
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Initialize the record to defaults (extension install)
    pub async fn on_installed(&self) -> Result<()> {
        self.store.save(&Settings::default()).await?;
        info!("Lull - Audio Normalizer installed successfully");
        Ok(())
    }

    /// Current settings
    ///
    /// Never fails: a store read error falls back to the defaults.
    pub async fn get_state(&self) -> Settings {
        match self.store.load().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Settings read failed, serving defaults: {}", e);
                Settings::default()
            }
        }
    }

    /// Persist new settings and notify every page
    ///
    /// Acknowledges once the write completes; notification delivery is not
    /// awaited.
    pub async fn update_state(&self, settings: Settings) -> Result<UpdateAck> {
        self.store.save(&settings).await?;
        debug!(
            "Settings updated: enabled={} intensity={}",
            settings.enabled, settings.intensity
        );

        self.notifier
            .notify_all(Message::StateChanged { state: settings });

        Ok(UpdateAck::ok())
    }

    /// Dispatch one incoming message
    ///
    /// Returns `None` for messages the hub does not answer.
    pub async fn handle(&self, message: Message) -> Result<Option<Response>> {
        match message {
            Message::GetState => Ok(Some(Response::State(self.get_state().await))),
            Message::UpdateState { state } => {
                let ack = self.update_state(state).await?;
                Ok(Some(Response::Ack(ack)))
            }
            Message::StateChanged { .. } => Ok(None),
        }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Underlying notifier
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
