//! Storage port for persisted collections.
//!
//! A [`StoragePort`] is a synchronous string key/value store, the same shape
//! as browser local storage. Collections are stored as JSON text under a
//! fixed key each.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or the backing document could not be written.
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A synchronous string key/value store.
///
/// Methods take `&self`; implementations use interior mutability.
pub trait StoragePort: Send + Sync {
    /// Get the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write several keys at once. Either every entry is written or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written. No entry is
    /// persisted in that case.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.set_many(&[(key, value)])
    }
}

/// In-memory storage. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one raw value, e.g. to seed malformed data in tests.
    #[must_use]
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.to_owned(), value.into());
        }
        store
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, new_entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        for (key, value) in new_entries {
            entries.insert((*key).to_owned(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_get_missing() {
        let storage = MemoryStorage::new();
        assert!(storage.get("cart").unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_set_and_remove() {
        let storage = MemoryStorage::new();
        storage.set("cart", "[]".to_string()).unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));

        storage.remove("cart").unwrap();
        assert!(storage.get("cart").unwrap().is_none());

        // Removing again is fine
        storage.remove("cart").unwrap();
    }

    #[test]
    fn test_memory_storage_set_many() {
        let storage = MemoryStorage::with_entry("wishlist", "[1]");
        storage
            .set_many(&[("cart", "[2]".to_string()), ("wishlist", "[]".to_string())])
            .unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[2]"));
        assert_eq!(storage.get("wishlist").unwrap().as_deref(), Some("[]"));
    }
}
