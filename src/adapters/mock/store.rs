//! In-memory key-value store for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{KeyValueStore, StorageError};

/// In-memory key-value store for testing.
///
/// Writes can be made to fail to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut map = store.entries.lock().unwrap();
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Make every subsequent write fail.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Copy of the current entries.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().unwrap().clone()
    }

    fn check_fail(&self) -> Result<(), StorageError> {
        if *self.should_fail.lock().unwrap() {
            return Err(StorageError::Io("Mock write failure".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_fail()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_fail()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        self.check_fail()?;
        let mut entries = self.entries.lock().unwrap();
        for (key, value) in pairs {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.check_fail()?;
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
