//! Persistence of the edited document.
//!
//! This module defines the [`KeyValueStore`] contract the document is saved
//! through, two stores implementing it, and the [`Persistence`] adapter that
//! loads and saves [`AppState`] while degrading gracefully on failure.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::model::AppState;
use log::*;

/// Key under which the whole document is stored.
///
pub const STORAGE_KEY: &str = "blueschema_app_state";

/// Durable string key-value storage.
///
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Loads and saves the document through a [`KeyValueStore`].
///
/// Neither operation fails: unreadable or corrupt state falls back to the
/// seed document and failed writes leave the in-memory document authoritative.
///
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Persistence {
        Persistence {
            store: Box::new(store),
        }
    }

    /// Returns a reference to the underlying store.
    ///
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Return the persisted document, or the seed document if nothing usable
    /// is stored.
    ///
    pub fn load(&self) -> AppState {
        match self.try_load() {
            Ok(Some(state)) => {
                debug!("Loaded document from store key '{}'", STORAGE_KEY);
                state
            }
            Ok(None) => {
                info!("No stored document found, starting from seed data");
                AppState::seed()
            }
            Err(e) => {
                error!("Error loading stored document, starting from seed data: {}", e);
                AppState::seed()
            }
        }
    }

    fn try_load(&self) -> Result<Option<AppState>, StoreError> {
        match self.store.get(STORAGE_KEY)? {
            Some(serialized) => serde_json::from_str(&serialized)
                .map(Some)
                .map_err(|e| StoreError::Corrupt(e.to_string())),
            None => Ok(None),
        }
    }

    /// Write the whole document under [`STORAGE_KEY`]. Failures are logged
    /// and swallowed; the return value reports whether the write succeeded.
    ///
    pub fn save(&mut self, state: &AppState) -> bool {
        match self.try_save(state) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving document: {}", e);
                false
            }
        }
    }

    fn try_save(&mut self, state: &AppState) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(state)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        self.store.set(STORAGE_KEY, &serialized)
    }
}
