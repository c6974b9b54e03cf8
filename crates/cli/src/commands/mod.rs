//! Command implementations.

pub mod collections;
pub mod products;

use std::sync::Arc;

use misterdesign_core::{CollectionName, CollectionStore, ProductId, StorageError};
use misterdesign_storefront::catalog::{CatalogClient, CatalogError};
use misterdesign_storefront::config::{CatalogConfig, ConfigError, StorefrontConfig};
use misterdesign_storefront::storage::FileStorage;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The collections file could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The product API request failed.
    #[error("Product API error: {0}")]
    Catalog(#[from] CatalogError),

    /// The product is not in the collection.
    #[error("Product {id} is not in the {collection}")]
    NotInCollection {
        id: ProductId,
        collection: CollectionName,
    },
}

/// Open the collections file the storefront uses.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the data directory cannot
/// be created.
pub fn open_store() -> Result<CollectionStore, CommandError> {
    let config = StorefrontConfig::from_env()?;
    let storage = FileStorage::open(config.storage_path())?;
    tracing::debug!(path = %storage.path().display(), "Opened collections storage");
    Ok(CollectionStore::new(Arc::new(storage)))
}

/// Build a product API client from the environment.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the client cannot be built.
pub fn catalog_client() -> Result<CatalogClient, CommandError> {
    let config = CatalogConfig::from_env()?;
    Ok(CatalogClient::new(&config)?)
}
