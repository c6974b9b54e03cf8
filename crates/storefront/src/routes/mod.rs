//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Home page
//! GET  /health                        - Health check
//!
//! # Products
//! GET  /product                       - Product listing
//! GET  /product/{id}                  - Product detail
//! POST /product/{id}/cart             - Add to cart (form: quantity)
//! POST /product/{id}/wishlist         - Toggle wishlist membership
//!
//! # Cart
//! GET  /cart                          - Cart page
//! POST /cart/update                   - Set quantity (form: id, quantity)
//! POST /cart/remove                   - Remove item (form: id)
//! POST /cart/move-to-wishlist         - Move item to wishlist (form: id)
//! POST /checkout                      - Confirm order, redirect home
//!
//! # Wishlist
//! GET  /wishlist                      - Wishlist page
//! POST /wishlist/remove               - Remove item (form: id)
//! POST /wishlist/add-to-cart          - Copy item into the cart (form: id)
//! POST /wishlist/move-to-cart         - Move item to the cart (form: id)
//! ```
//!
//! Every POST answers with `303 See Other` and a `?notice=` parameter the
//! target page renders as a toast.

pub mod cart;
pub mod home;
pub mod notice;
pub mod products;
pub mod views;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/cart", post(products::add_to_cart))
        .route("/{id}/wishlist", post(products::toggle_wishlist))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/move-to-wishlist", post(cart::move_to_wishlist))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/remove", post(wishlist::remove))
        .route("/add-to-cart", post(wishlist::add_to_cart))
        .route("/move-to-cart", post(wishlist::move_to_cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/product", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", post(cart::checkout))
}
