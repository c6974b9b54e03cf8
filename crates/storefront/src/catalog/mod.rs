//! Product API access.
//!
//! # Architecture
//!
//! - [`ProductSource`] is the seam the pages depend on
//! - [`CatalogClient`] implements it over HTTP with `reqwest`
//! - Responses are cached in memory via `moka` (5 minute TTL by default)
//!
//! The product API is read-only: `GET /products` and `GET /products/{id}`.
//! There is no retry and no pagination.

mod cache;
mod client;

pub use client::CatalogClient;

use async_trait::async_trait;
use misterdesign_core::{Product, ProductId};
use thiserror::Error;

/// Errors that can occur when talking to the product API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Product API returned status {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built from the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered 200 with an empty or `null` body where a list was expected.
    #[error("Product API returned an empty body")]
    EmptyBody,

    /// No product has this id.
    #[error("Not found: product {0}")]
    NotFound(ProductId),
}

/// Read access to product records.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch every product.
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch one product by id.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}
