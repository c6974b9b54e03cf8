//! HTTP client for the product API.

use std::sync::Arc;

use async_trait::async_trait;
use misterdesign_core::{Product, ProductId};
use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::cache::{CacheKey, CacheValue};
use super::{CatalogError, ProductSource};
use crate::config::CatalogConfig;

/// Client for the product API.
///
/// Cheaply cloneable via `Arc`. Product lists and single products are cached
/// for the configured TTL.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new product API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("misterdesign-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// GET `path` relative to the base URL and decode the JSON body.
    ///
    /// Returns `Ok(None)` for an empty or `null` body. Any non-success status,
    /// 404 included, is [`CatalogError::Status`]; callers decide what a
    /// missing resource means.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(path, "Product API returned 404");
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Product API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        decode_body(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse product API response"
            );
        })
    }
}

#[async_trait]
impl ProductSource for CatalogClient {
    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for product list");
            return Ok(products.as_ref().clone());
        }

        let products: Vec<Product> = self
            .get_json("products")
            .await?
            .ok_or(CatalogError::EmptyBody)?;

        // Seed the detail cache so opening a listed product skips a round trip
        for product in &products {
            self.inner
                .cache
                .insert(
                    CacheKey::Product(product.id),
                    CacheValue::Product(Box::new(product.clone())),
                )
                .await;
        }
        self.inner
            .cache
            .insert(
                CacheKey::Products,
                CacheValue::Products(Arc::new(products.clone())),
            )
            .await;

        debug!(count = products.len(), "Fetched product list");
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(CacheValue::Product(product)) =
            self.inner.cache.get(&CacheKey::Product(id)).await
        {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        // The API reports unknown ids with an empty body or a 404
        let product: Product = match self.get_json(&format!("products/{id}")).await {
            Ok(Some(product)) => product,
            Ok(None) | Err(CatalogError::Status(StatusCode::NOT_FOUND)) => {
                return Err(CatalogError::NotFound(id));
            }
            Err(e) => return Err(e),
        };

        self.inner
            .cache
            .insert(
                CacheKey::Product(id),
                CacheValue::Product(Box::new(product.clone())),
            )
            .await;

        Ok(product)
    }
}

/// Decode a response body, mapping an empty or `null` body to `None`.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>, CatalogError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<T>>(body)?)
}
