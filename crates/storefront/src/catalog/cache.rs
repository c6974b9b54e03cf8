//! Cache types for product API responses.

use std::sync::Arc;

use misterdesign_core::{Product, ProductId};

/// Cache key for product responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Box<Product>),
}
