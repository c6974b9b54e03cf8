//! Integration tests for the MisterDesign storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p misterdesign-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Full router driven with `tower::ServiceExt::oneshot`
//! - `collection_store` - Cart and wishlist behavior over each storage backend
//! - `catalog_client` - HTTP client against a local stub product API
//!
//! Nothing here talks to the real product API.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use misterdesign_core::{CollectionStore, MemoryStorage, Price, Product, ProductId, Rating};
use misterdesign_storefront::catalog::{CatalogError, ProductSource};
use misterdesign_storefront::state::AppState;
use tower::ServiceExt;

// =============================================================================
// Fixtures
// =============================================================================

/// Three products shaped like the public product API's records.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, "Fjallraven Foldsack No 1 Backpack", 10995, "men's clothing", 3.9, 120),
        product(2, "Mens Casual Premium Slim Fit T-Shirts", 2230, "men's clothing", 4.1, 259),
        product(9, "WD 2TB Elements Portable External Hard Drive", 6400, "electronics", 3.3, 203),
    ]
}

/// Build one product record.
#[must_use]
pub fn product(id: i32, title: &str, cents: i64, category: &str, rate: f64, count: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::from_cents(cents),
        category: category.to_string(),
        description: format!("Description of {title}"),
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        rating: Some(Rating { rate, count }),
    }
}

// =============================================================================
// Stub product source
// =============================================================================

/// In-memory product source that counts calls and can be told to fail.
pub struct StubCatalog {
    products: Vec<Product>,
    failing: bool,
    calls: AtomicUsize,
}

impl StubCatalog {
    /// Serve `products`.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            failing: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer every call with a 503 status error.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            products: Vec::new(),
            failing: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(CatalogError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductSource for StubCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.record_call()?;
        Ok(self.products.clone())
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.record_call()?;
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}

// =============================================================================
// Test application
// =============================================================================

/// The storefront router over a stub catalog and in-memory storage.
pub struct TestApp {
    pub router: Router,
    pub store: CollectionStore,
    pub catalog: Arc<StubCatalog>,
}

impl TestApp {
    /// App serving [`sample_products`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(StubCatalog::new(sample_products()))
    }

    /// App serving whatever `catalog` answers.
    #[must_use]
    pub fn with_catalog(catalog: StubCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let store = CollectionStore::new(Arc::new(MemoryStorage::new()));
        let state = AppState::new(catalog.clone(), store.clone());

        Self {
            router: misterdesign_storefront::app(state),
            store,
            catalog,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Send a POST request with a url-encoded form body.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send an arbitrary request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Header value as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}
