//! Durable key-value storage
//!
//! The booking snapshot and the registration snapshot each live under one
//! fixed key. Backends only move strings; (de)serialization happens in the
//! state layer.

pub mod file_store;

use std::{collections::HashMap, sync::Mutex};

use crate::error::StorageError;

pub use file_store::FileStore;

/// Key holding the booking state snapshot
pub const STATE_KEY: &str = "voyageflow-state";
/// Key holding the registration form snapshot
pub const REGISTRATION_KEY: &str = "voyageflow-registration";

/// Minimal string key-value storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(STATE_KEY).unwrap(), None);

        store.set(STATE_KEY, "{}").unwrap();
        assert_eq!(store.get(STATE_KEY).unwrap().as_deref(), Some("{}"));

        store.remove(STATE_KEY).unwrap();
        store.remove(STATE_KEY).unwrap();
        assert_eq!(store.get(STATE_KEY).unwrap(), None);
    }
}
