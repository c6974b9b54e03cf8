//! Storefront pages driven through the full router.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use misterdesign_core::{CollectionItem, CollectionName, ProductId};
use misterdesign_integration_tests::{StubCatalog, TestApp, sample_products};

fn cart_quantity(app: &TestApp, id: i32) -> Option<u32> {
    app.store
        .load(CollectionName::Cart)
        .iter()
        .find(|item| item.id == ProductId::new(id))
        .map(|item| item.quantity)
}

fn wishlist_ids(app: &TestApp) -> Vec<ProductId> {
    app.store
        .load(CollectionName::Wishlist)
        .iter()
        .map(|item| item.id)
        .collect()
}

// ============================================================================
// Layout & Middleware
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_home_page_has_navigation_and_footer() {
    let app = TestApp::new();
    let resp = app.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"href="/product""#));
    assert!(resp.body.contains(r#"href="/cart""#));
    assert!(resp.body.contains(r#"href="/wishlist""#));
    assert!(resp.body.contains("Customer Service"));
    assert!(resp.body.contains("Popular Brands"));
    assert!(resp.body.contains("Klarna"));
    assert!(resp.body.contains("All prices include VAT"));
    assert_eq!(app.catalog.calls(), 0);
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::new();
    let resp = app.get("/").await;

    let csp = resp.header("content-security-policy").unwrap();
    assert!(csp.contains("form-action 'self'"));
    assert!(csp.contains("https://fakestoreapi.com"));
    assert_eq!(resp.header("x-frame-options"), Some("DENY"));
    assert_eq!(resp.header("x-content-type-options"), Some("nosniff"));
    assert!(resp.header("x-request-id").is_some_and(|id| !id.is_empty()));
}

// ============================================================================
// Product Listing
// ============================================================================

#[tokio::test]
async fn test_product_listing() {
    let app = TestApp::new();
    let resp = app.get("/product").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Our Products"));
    for product in sample_products() {
        assert!(resp.body.contains(&product.title));
        assert!(resp.body.contains(&format!(r#"href="/product/{}""#, product.id)));
    }
    assert!(resp.body.contains("$109.95"));
    assert!(resp.body.contains("$22.30"));
}

#[tokio::test]
async fn test_product_listing_fetch_failure() {
    let app = TestApp::with_catalog(StubCatalog::failing());
    let resp = app.get("/product").await;

    assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    assert!(resp.body.contains("Failed to fetch products"));
}

// ============================================================================
// Product Detail
// ============================================================================

#[tokio::test]
async fn test_product_detail() {
    let app = TestApp::new();
    let resp = app.get("/product/1").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Fjallraven Foldsack No 1 Backpack"));
    assert!(resp.body.contains("$109.95"));
    assert!(resp.body.contains("(120 reviews)"));
    assert_eq!(resp.body.matches(r#"class="star star-filled""#).count(), 3);
    assert!(resp.body.contains(r#"action="/product/1/cart""#));
    assert!(resp.body.contains(r#"aria-label="Add to wishlist""#));
}

#[tokio::test]
async fn test_product_detail_non_numeric_id_skips_fetch() {
    let app = TestApp::new();
    let resp = app.get("/product/abc").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("Product not found"));
    assert_eq!(app.catalog.calls(), 0);
}

#[tokio::test]
async fn test_product_detail_unknown_id() {
    let app = TestApp::new();
    let resp = app.get("/product/99").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("Product not found"));
    assert_eq!(app.catalog.calls(), 1);
}

#[tokio::test]
async fn test_product_detail_fetch_failure() {
    let app = TestApp::with_catalog(StubCatalog::failing());
    let resp = app.get("/product/1").await;

    assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    assert!(resp.body.contains("Failed to fetch product"));
}

#[tokio::test]
async fn test_product_detail_toast_names_product() {
    let app = TestApp::new();
    let resp = app.get("/product/2?notice=added-to-wishlist").await;

    assert!(
        resp.body
            .contains("Added Mens Casual Premium Slim Fit T-Shirts to wishlist")
    );

    let resp = app.get("/product/2?notice=not-a-notice").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(!resp.body.contains(r#"class="toast""#));
}

#[tokio::test]
async fn test_add_to_cart_then_increment() {
    let app = TestApp::new();

    let resp = app.post_form("/product/1/cart", "quantity=2").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/product/1?notice=added-to-cart"));
    assert_eq!(cart_quantity(&app, 1), Some(2));

    let resp = app.post_form("/product/1/cart", "quantity=3").await;
    assert_eq!(
        resp.location(),
        Some("/product/1?notice=updated-cart-quantity")
    );
    assert_eq!(cart_quantity(&app, 1), Some(5));
    assert_eq!(app.store.load(CollectionName::Cart).len(), 1);

    let resp = app.get("/product/1?notice=updated-cart-quantity").await;
    assert!(
        resp.body
            .contains("Updated Fjallraven Foldsack No 1 Backpack quantity in cart")
    );
    assert!(resp.body.contains("In your cart"));
}

#[tokio::test]
async fn test_add_to_cart_clamps_quantity() {
    let app = TestApp::new();

    app.post_form("/product/2/cart", "quantity=0").await;
    assert_eq!(cart_quantity(&app, 2), Some(1));

    app.post_form("/product/9/cart", "").await;
    assert_eq!(cart_quantity(&app, 9), Some(1));

    let resp = app.post_form("/product/1/cart", "quantity=").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(cart_quantity(&app, 1), Some(1));

    let resp = app.post_form("/product/1/cart", "quantity=many").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(cart_quantity(&app, 1), Some(2));
}

#[tokio::test]
async fn test_add_to_cart_unknown_product() {
    let app = TestApp::new();
    let resp = app.post_form("/product/99/cart", "quantity=1").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(app.store.load(CollectionName::Cart).is_empty());
}

#[tokio::test]
async fn test_wishlist_toggle() {
    let app = TestApp::new();

    let resp = app.post_form("/product/2/wishlist", "").await;
    assert_eq!(resp.location(), Some("/product/2?notice=added-to-wishlist"));
    assert_eq!(wishlist_ids(&app), vec![ProductId::new(2)]);

    let resp = app.get("/product/2").await;
    assert!(resp.body.contains(r#"aria-label="Remove from wishlist""#));

    let resp = app.post_form("/product/2/wishlist", "").await;
    assert_eq!(
        resp.location(),
        Some("/product/2?notice=removed-from-wishlist")
    );
    assert!(wishlist_ids(&app).is_empty());
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_empty() {
    let app = TestApp::new();
    let resp = app.get("/cart").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your cart is empty"));
    assert!(!resp.body.contains(r#"action="/checkout""#));
}

#[tokio::test]
async fn test_cart_lists_items_and_total() {
    let app = TestApp::new();
    app.post_form("/product/1/cart", "quantity=2").await;
    app.post_form("/product/2/cart", "quantity=1").await;

    let resp = app.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Fjallraven Foldsack No 1 Backpack"));
    assert!(resp.body.contains("Mens Casual Premium Slim Fit T-Shirts"));
    // 2 x 109.95 + 22.30
    assert!(resp.body.contains("$219.90"));
    assert!(resp.body.contains("$242.20"));
    assert!(resp.body.contains("3 item(s)"));
}

#[tokio::test]
async fn test_cart_update_quantity() {
    let app = TestApp::new();
    app.post_form("/product/1/cart", "quantity=1").await;

    let resp = app.post_form("/cart/update", "id=1&quantity=4").await;
    assert_eq!(resp.location(), Some("/cart?notice=updated-cart-quantity"));
    assert_eq!(cart_quantity(&app, 1), Some(4));

    let resp = app.post_form("/cart/update", "id=1&quantity=0").await;
    assert_eq!(resp.location(), Some("/cart?notice=removed-from-cart"));
    assert_eq!(cart_quantity(&app, 1), None);

    let resp = app.post_form("/cart/update", "id=1&quantity=2").await;
    assert_eq!(resp.location(), Some("/cart"));
}

#[tokio::test]
async fn test_cart_remove() {
    let app = TestApp::new();
    app.post_form("/product/1/cart", "quantity=1").await;
    app.post_form("/product/9/cart", "quantity=1").await;

    let resp = app.post_form("/cart/remove", "id=1").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart?notice=removed-from-cart"));

    let cart = app.store.load(CollectionName::Cart);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].id, ProductId::new(9));
}

#[tokio::test]
async fn test_cart_move_to_wishlist() {
    let app = TestApp::new();
    app.post_form("/product/1/cart", "quantity=3").await;

    let resp = app.post_form("/cart/move-to-wishlist", "id=1").await;
    assert_eq!(resp.location(), Some("/cart?notice=moved-to-wishlist"));
    assert_eq!(cart_quantity(&app, 1), None);
    assert_eq!(wishlist_ids(&app), vec![ProductId::new(1)]);

    let resp = app.get("/cart?notice=moved-to-wishlist").await;
    assert!(resp.body.contains("Moved to wishlist"));
    assert!(!resp.body.contains("Moved Item"));
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_cart_rejects_malformed_form() {
    let app = TestApp::new();
    let resp = app.post_form("/cart/remove", "id=lamp").await;
    assert!(resp.status.is_client_error());
}

#[tokio::test]
async fn test_checkout() {
    let app = TestApp::new();

    let resp = app.post_form("/checkout", "").await;
    assert_eq!(resp.location(), Some("/cart"));

    app.post_form("/product/1/cart", "quantity=1").await;
    let resp = app.post_form("/checkout", "").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/?notice=checkout-complete"));
    assert_eq!(cart_quantity(&app, 1), Some(1));

    let resp = app.get("/?notice=checkout-complete").await;
    assert!(resp.body.contains("Checkout successful"));
}

// ============================================================================
// Wishlist
// ============================================================================

#[tokio::test]
async fn test_wishlist_empty() {
    let app = TestApp::new();
    let resp = app.get("/wishlist").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your wishlist is empty"));
}

#[tokio::test]
async fn test_wishlist_lists_items() {
    let app = TestApp::new();
    app.post_form("/product/9/wishlist", "").await;

    let resp = app.get("/wishlist").await;
    assert!(
        resp.body
            .contains("WD 2TB Elements Portable External Hard Drive")
    );
    assert!(resp.body.contains("$64.00"));
    assert!(resp.body.contains(r#"action="/wishlist/move-to-cart""#));
}

#[tokio::test]
async fn test_wishlist_add_to_cart_keeps_item() {
    let app = TestApp::new();
    app.post_form("/product/2/wishlist", "").await;

    let resp = app.post_form("/wishlist/add-to-cart", "id=2").await;
    assert_eq!(resp.location(), Some("/wishlist?notice=copied-to-cart"));
    assert_eq!(cart_quantity(&app, 2), Some(1));
    assert_eq!(wishlist_ids(&app), vec![ProductId::new(2)]);

    app.post_form("/wishlist/add-to-cart", "id=2").await;
    assert_eq!(cart_quantity(&app, 2), Some(2));
}

#[tokio::test]
async fn test_wishlist_move_to_cart() {
    let app = TestApp::new();
    app.post_form("/product/2/wishlist", "").await;
    app.post_form("/product/2/cart", "quantity=2").await;

    let resp = app.post_form("/wishlist/move-to-cart", "id=2").await;
    assert_eq!(resp.location(), Some("/wishlist?notice=moved-to-cart"));
    assert!(wishlist_ids(&app).is_empty());
    assert_eq!(cart_quantity(&app, 2), Some(3));
}

#[tokio::test]
async fn test_wishlist_remove() {
    let app = TestApp::new();
    app.post_form("/product/1/wishlist", "").await;

    let resp = app.post_form("/wishlist/remove", "id=1").await;
    assert_eq!(resp.location(), Some("/wishlist?notice=removed-from-wishlist"));
    assert!(wishlist_ids(&app).is_empty());

    let resp = app.post_form("/wishlist/remove", "id=1").await;
    assert_eq!(resp.location(), Some("/wishlist"));
}

#[tokio::test]
async fn test_wishlist_action_for_missing_item_changes_nothing() {
    let app = TestApp::new();
    let resp = app.post_form("/wishlist/move-to-cart", "id=4").await;

    assert_eq!(resp.location(), Some("/wishlist"));
    assert!(app.store.load(CollectionName::Cart).is_empty());
}

// ============================================================================
// Stored Data
// ============================================================================

#[tokio::test]
async fn test_legacy_name_field_renders_as_title() {
    let app = TestApp::new();
    let legacy: Vec<CollectionItem> = serde_json::from_str(
        r#"[{"id": 5, "name": "Oak side table", "price": 12.5, "quantity": 2}]"#,
    )
    .unwrap();
    app.store.save(CollectionName::Cart, &legacy).unwrap();

    let resp = app.get("/cart").await;
    assert!(resp.body.contains("Oak side table"));
    assert!(resp.body.contains("$25.00"));
}

#[tokio::test]
async fn test_oversized_stored_line_total_still_renders() {
    let app = TestApp::new();
    let stored: Vec<CollectionItem> = serde_json::from_str(
        r#"[{"id": 6, "title": "Gold plated chair", "price": 1e20, "quantity": 4000000000},
            {"id": 7, "title": "Footstool", "price": 10.5, "quantity": 1}]"#,
    )
    .unwrap();
    app.store.save(CollectionName::Cart, &stored).unwrap();

    let resp = app.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Gold plated chair"));
    assert!(resp.body.contains("$79228162514264337593543950335.00"));

    let resp = app.post_form("/checkout", "").await;
    assert_eq!(resp.location(), Some("/?notice=checkout-complete"));
}
