//! Application state shared across handlers.

use std::sync::Arc;

use misterdesign_core::CollectionStore;

use crate::catalog::ProductSource;
use crate::error::{AppError, Result};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// product source and the persisted collections.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Arc<dyn ProductSource>,
    collections: CollectionStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Where product records come from
    /// * `collections` - Cart and wishlist persistence
    #[must_use]
    pub fn new(catalog: Arc<dyn ProductSource>, collections: CollectionStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                collections,
            }),
        }
    }

    /// Get a reference to the product source.
    #[must_use]
    pub fn catalog(&self) -> &dyn ProductSource {
        self.inner.catalog.as_ref()
    }

    /// Get a reference to the cart and wishlist store.
    #[must_use]
    pub fn collections(&self) -> &CollectionStore {
        &self.inner.collections
    }

    /// Run `f` against the cart and wishlist store on the blocking pool.
    ///
    /// Store calls take a mutex and touch the filesystem, so handlers go
    /// through here instead of calling [`Self::collections`] directly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Task`] if `f` panics.
    pub async fn with_collections<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CollectionStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = self.inner.collections.clone();
        Ok(tokio::task::spawn_blocking(move || f(&store)).await?)
    }
}
