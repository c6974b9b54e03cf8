//! Persisted cart and wishlist collections.
//!
//! A collection is an ordered list of [`CollectionItem`]s stored as one JSON
//! array under a fixed key in a [`StoragePort`]. Every mutation is a whole-value
//! replacement: load the list, compute the new list, write it back.
//!
//! # Merge policy
//!
//! Adding an item whose id is already present never creates a duplicate:
//! - `cart` increases the existing item's quantity
//! - `wishlist` leaves the existing item as is
//!
//! Lists written by other producers may still hold duplicates. Removal drops
//! every item with the given id.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use misterdesign_core::{CollectionItem, CollectionName, CollectionStore, MemoryStorage, Price, ProductId};
//!
//! let store = CollectionStore::new(Arc::new(MemoryStorage::new()));
//! let item = CollectionItem {
//!     id: ProductId::new(1),
//!     title: "Desk lamp".to_string(),
//!     price: Price::from_cents(999),
//!     category: String::new(),
//!     description: String::new(),
//!     image: String::new(),
//!     rating: None,
//!     quantity: 1,
//! };
//!
//! store.add_item(CollectionName::Cart, item)?;
//! let cart = store.load(CollectionName::Cart);
//! assert_eq!(misterdesign_core::collection::total(&cart), Price::from_cents(999));
//! # Ok::<(), misterdesign_core::StorageError>(())
//! ```

mod storage;

use core::fmt;
use core::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::types::{CollectionItem, Price, ProductId};

pub use storage::{MemoryStorage, StorageError, StoragePort};

/// The two persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionName {
    Cart,
    Wishlist,
}

/// What happens when an added item's id is already in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Add the incoming quantity to the existing item.
    IncrementQuantity,
    /// Keep the existing item unchanged.
    KeepExisting,
}

impl CollectionName {
    /// Every collection, in display order.
    pub const ALL: [Self; 2] = [Self::Cart, Self::Wishlist];

    /// The storage key the collection is persisted under.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
        }
    }

    /// How duplicate ids are merged on add.
    #[must_use]
    pub const fn merge_policy(self) -> MergePolicy {
        match self {
            Self::Cart => MergePolicy::IncrementQuantity,
            Self::Wishlist => MergePolicy::KeepExisting,
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Error parsing a [`CollectionName`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown collection '{0}' (expected 'cart' or 'wishlist')")]
pub struct UnknownCollection(String);

impl FromStr for CollectionName {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(Self::Cart),
            "wishlist" => Ok(Self::Wishlist),
            other => Err(UnknownCollection(other.to_owned())),
        }
    }
}

/// Result of adding an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was appended.
    Added,
    /// An item with the same id existed; its quantity was increased.
    Incremented,
    /// An item with the same id existed and was left unchanged.
    AlreadyPresent,
}

/// Result of toggling an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Sum of `price * quantity` over `items`.
#[must_use]
pub fn total(items: &[CollectionItem]) -> Price {
    items.iter().map(CollectionItem::line_total).sum()
}

/// Total number of units over `items`.
#[must_use]
pub fn unit_count(items: &[CollectionItem]) -> u32 {
    items
        .iter()
        .fold(0_u32, |acc, item| acc.saturating_add(item.quantity))
}

/// Cart and wishlist persistence over a [`StoragePort`].
///
/// Cheaply cloneable via `Arc`. Mutations are serialized so two concurrent
/// read-modify-write cycles cannot interleave.
#[derive(Clone)]
pub struct CollectionStore {
    inner: Arc<CollectionStoreInner>,
}

struct CollectionStoreInner {
    storage: Arc<dyn StoragePort>,
    write_lock: Mutex<()>,
}

impl CollectionStore {
    /// Create a store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            inner: Arc::new(CollectionStoreInner {
                storage,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Load a collection.
    ///
    /// Returns an empty list when nothing is stored, when the stored text is
    /// not a valid item list, or when the backend cannot be read.
    #[must_use]
    pub fn load(&self, name: CollectionName) -> Vec<CollectionItem> {
        match self.inner.storage.get(name.storage_key()) {
            Ok(Some(raw)) => decode(name, &raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(collection = %name, error = %e, "Failed to read collection");
                Vec::new()
            }
        }
    }

    /// Replace a collection with `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be encoded or written.
    pub fn save(&self, name: CollectionName, items: &[CollectionItem]) -> Result<(), StorageError> {
        let _guard = self.lock()?;
        self.write(name, items)
    }

    /// Whether an item with `id` is in the collection.
    #[must_use]
    pub fn contains(&self, name: CollectionName, id: ProductId) -> bool {
        self.load(name).iter().any(|item| item.id == id)
    }

    /// Add `item` under the collection's [`MergePolicy`].
    ///
    /// # Errors
    ///
    /// Returns an error if the updated collection cannot be written.
    pub fn add_item(
        &self,
        name: CollectionName,
        item: CollectionItem,
    ) -> Result<AddOutcome, StorageError> {
        self.update(name, |items| merge(items, item, name.merge_policy()))
    }

    /// Remove every item with `id`. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated collection cannot be written.
    pub fn remove_item(&self, name: CollectionName, id: ProductId) -> Result<usize, StorageError> {
        self.update(name, |items| remove_all(items, id))
    }

    /// Remove the item if present, add it otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated collection cannot be written.
    pub fn toggle_item(
        &self,
        name: CollectionName,
        item: CollectionItem,
    ) -> Result<Toggle, StorageError> {
        self.update(name, |items| {
            if remove_all(items, item.id) > 0 {
                Toggle::Removed
            } else {
                merge(items, item, name.merge_policy());
                Toggle::Added
            }
        })
    }

    /// Set the quantity of the item with `id`. A quantity of zero removes it.
    ///
    /// Returns `false` if no item has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated collection cannot be written.
    pub fn set_quantity(
        &self,
        name: CollectionName,
        id: ProductId,
        quantity: u32,
    ) -> Result<bool, StorageError> {
        self.update(name, |items| {
            if quantity == 0 {
                return remove_all(items, id) > 0;
            }
            let mut found = false;
            for item in items.iter_mut().filter(|item| item.id == id) {
                item.quantity = quantity;
                found = true;
            }
            found
        })
    }

    /// Move `item` from one collection to another.
    ///
    /// Every item with `item.id` leaves `from`, and `item` is added to `to`
    /// under `to`'s merge policy. Both collections are written in a single
    /// storage operation, so a failed write leaves both unchanged. Moving
    /// within one collection changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated collections cannot be written.
    pub fn move_item(
        &self,
        from: CollectionName,
        to: CollectionName,
        item: CollectionItem,
    ) -> Result<AddOutcome, StorageError> {
        if from == to {
            return Ok(AddOutcome::AlreadyPresent);
        }

        let _guard = self.lock()?;
        let mut source = self.load(from);
        let mut target = self.load(to);

        let removed = remove_all(&mut source, item.id);
        let outcome = merge(&mut target, item, to.merge_policy());

        let entries = [
            (from.storage_key(), serde_json::to_string(&source)?),
            (to.storage_key(), serde_json::to_string(&target)?),
        ];
        self.inner.storage.set_many(&entries)?;

        debug!(%from, %to, removed, ?outcome, "Moved item between collections");
        Ok(outcome)
    }

    /// Delete the persisted collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn clear(&self, name: CollectionName) -> Result<(), StorageError> {
        let _guard = self.lock()?;
        self.inner.storage.remove(name.storage_key())
    }

    fn update<R>(
        &self,
        name: CollectionName,
        f: impl FnOnce(&mut Vec<CollectionItem>) -> R,
    ) -> Result<R, StorageError> {
        let _guard = self.lock()?;
        let mut items = self.load(name);
        let result = f(&mut items);
        self.write(name, &items)?;
        Ok(result)
    }

    fn write(&self, name: CollectionName, items: &[CollectionItem]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.inner.storage.set(name.storage_key(), raw)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StorageError> {
        self.inner
            .write_lock
            .lock()
            .map_err(|_| StorageError::Poisoned)
    }
}

fn decode(name: CollectionName, raw: &str) -> Vec<CollectionItem> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(collection = %name, error = %e, "Stored collection is malformed, treating as empty");
        Vec::new()
    })
}

fn merge(items: &mut Vec<CollectionItem>, mut item: CollectionItem, policy: MergePolicy) -> AddOutcome {
    if let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) {
        return match policy {
            MergePolicy::IncrementQuantity => {
                existing.quantity = existing.quantity.saturating_add(item.quantity.max(1));
                AddOutcome::Incremented
            }
            MergePolicy::KeepExisting => AddOutcome::AlreadyPresent,
        };
    }

    item.quantity = match policy {
        MergePolicy::IncrementQuantity => item.quantity.max(1),
        MergePolicy::KeepExisting => 1,
    };
    items.push(item);
    AddOutcome::Added
}

fn remove_all(items: &mut Vec<CollectionItem>, id: ProductId) -> usize {
    let before = items.len();
    items.retain(|item| item.id != id);
    before - items.len()
}
