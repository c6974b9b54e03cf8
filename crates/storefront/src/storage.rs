//! Durable storage for the persisted collections.
//!
//! [`FileStorage`] keeps every key in one JSON object on disk, mapping each
//! key to its raw string value (the same shape as browser local storage):
//!
//! ```json
//! { "cart": "[{\"id\":1,...}]", "wishlist": "[]" }
//! ```
//!
//! Writes replace the whole document through a temporary file and a rename,
//! so a multi-key write lands completely or not at all.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use misterdesign_core::{StorageError, StoragePort};
use tracing::warn;

type Document = BTreeMap<String, String>;

/// File-backed [`StoragePort`].
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open storage at `path`, creating its parent directory if needed.
    /// The file itself is created on first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Location of the storage document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Document, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(Document::new());
        }

        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Storage document is malformed, starting from an empty document"
            );
            Document::new()
        }))
    }

    fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(document)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.read_document()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut document = self.read_document()?;
        for (key, value) in entries {
            document.insert((*key).to_owned(), value.clone());
        }
        self.write_document(&document)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut document = self.read_document()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use misterdesign_core::{CollectionItem, CollectionName, CollectionStore, Price, ProductId};

    use super::*;

    fn storage_in(dir: &tempfile::TempDir) -> FileStorage {
        FileStorage::open(dir.path().join("data").join("storage.json")).unwrap()
    }

    #[test]
    fn test_open_creates_parent_but_not_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.path().parent().unwrap().is_dir());
        assert!(!storage.path().exists());
        assert!(storage.get("cart").unwrap().is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        storage_in(&dir)
            .set_many(&[("cart", "[]".to_string()), ("wishlist", "[1]".to_string())])
            .unwrap();

        let reopened = storage_in(&dir);
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("wishlist").unwrap().as_deref(), Some("[1]"));
        assert!(!reopened.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_remove_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.set("cart", "[]".to_string()).unwrap();
        storage.set("wishlist", "[]".to_string()).unwrap();

        storage.remove("cart").unwrap();
        assert!(storage.get("cart").unwrap().is_none());
        assert!(storage.get("wishlist").unwrap().is_some());
    }

    #[test]
    fn test_malformed_document_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "{ this is not json").unwrap();

        assert!(storage.get("cart").unwrap().is_none());

        // The next write replaces the broken document
        storage.set("cart", "[]".to_string()).unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_collection_store_over_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let store = CollectionStore::new(Arc::new(storage_in(&dir)));
        let item = CollectionItem {
            id: ProductId::new(5),
            title: "Wall clock".to_string(),
            price: Price::from_cents(4200),
            category: "accessories".to_string(),
            description: String::new(),
            image: String::new(),
            rating: None,
            quantity: 1,
        };

        store.add_item(CollectionName::Wishlist, item.clone()).unwrap();
        store
            .move_item(CollectionName::Wishlist, CollectionName::Cart, item.clone())
            .unwrap();

        let reopened = CollectionStore::new(Arc::new(storage_in(&dir)));
        assert!(reopened.load(CollectionName::Wishlist).is_empty());
        assert_eq!(reopened.load(CollectionName::Cart), vec![item]);
    }
}
