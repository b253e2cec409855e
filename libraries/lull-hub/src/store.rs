//! Settings persistence
//!
//! The record is a full overwrite on every save; concurrent writers are
//! last-write-wins.

use async_trait::async_trait;
use lull_core::{Result, Settings};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Asynchronous key-value store holding the settings record
#[async_trait(?Send)]
pub trait SettingsStore {
    /// Read the record, filling missing fields with their defaults
    async fn load(&self) -> Result<Settings>;

    /// Overwrite the record
    async fn save(&self, settings: &Settings) -> Result<()>;
}

#[async_trait(?Send)]
impl<T: SettingsStore + ?Sized> SettingsStore for Rc<T> {
    async fn load(&self) -> Result<Settings> {
        (**self).load().await
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        (**self).save(settings).await
    }
}

/// In-process store
///
/// Behaves like an empty `chrome.storage.local` until the first save.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RefCell<Option<Settings>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a record
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            record: RefCell::new(Some(settings)),
            writes: Cell::new(0),
        }
    }

    /// Raw stored record, `None` if nothing was ever written
    pub fn snapshot(&self) -> Option<Settings> {
        *self.record.borrow()
    }

    /// Number of saves performed
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

#[async_trait(?Send)]
impl SettingsStore for MemoryStore {
    async fn load(&self) -> Result<Settings> {
        Ok(self.snapshot().unwrap_or_default())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.record.borrow_mut() = Some(*settings);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
