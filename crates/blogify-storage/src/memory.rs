//! In-memory storage for testing and ephemeral use.
//!
//! [`InMemoryStorage`] stores all records in a `HashMap` protected by a
//! `RwLock`. Data is lost when the storage is dropped.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::keys::validate_key;
use crate::traits::Storage;

/// An in-memory implementation of [`Storage`].
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    records: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return a sorted list of all keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(records.remove(key).is_some())
    }
}
