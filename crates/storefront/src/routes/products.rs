//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use misterdesign_core::{AddOutcome, CollectionItem, CollectionName, Product, ProductId, Toggle};
use serde::Deserialize;
use tracing::instrument;

use super::notice::{Notice, NoticeQuery, Toast};
use super::views::{ProductCardView, ProductDetailView};
use crate::error::{AppError, PRODUCT_NOT_FOUND, Result, add_breadcrumb};
use crate::state::AppState;

const FAILED_TO_FETCH_PRODUCTS: &str = "Failed to fetch products";
const FAILED_TO_FETCH_PRODUCT: &str = "Failed to fetch product";

/// Add to cart form data.
///
/// `quantity` is kept as submitted; a cleared number input sends `quantity=`.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub quantity: Option<String>,
}

impl AddToCartForm {
    /// Requested quantity. Missing or unparseable input means one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub in_cart: bool,
    pub in_wishlist: bool,
    pub toast: Option<Toast>,
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<ProductsIndexTemplate> {
    let products = state
        .catalog()
        .products()
        .await
        .map_err(|e| AppError::catalog(FAILED_TO_FETCH_PRODUCTS, e))?;

    Ok(ProductsIndexTemplate {
        products: products.iter().map(ProductCardView::from).collect(),
    })
}

/// Display product detail page.
///
/// A non-numeric id renders "Product not found" without calling the API.
#[instrument(skip(state, query))]
pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> Result<ProductShowTemplate> {
    let id = parse_product_id(&raw_id)?;
    let product = fetch_product(&state, id).await?;
    let (in_cart, in_wishlist) = state
        .with_collections(move |store| {
            (
                store.contains(CollectionName::Cart, id),
                store.contains(CollectionName::Wishlist, id),
            )
        })
        .await?;

    Ok(ProductShowTemplate {
        in_cart,
        in_wishlist,
        toast: Toast::from_query(&query, Some(product.title.as_str())),
        product: ProductDetailView::from(&product),
    })
}

/// Add the product to the cart, or raise its quantity if already there.
#[instrument(skip(state))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let id = parse_product_id(&raw_id)?;
    let product = fetch_product(&state, id).await?;
    let item = CollectionItem::from_product(&product, form.quantity());

    let outcome = state
        .with_collections(move |store| store.add_item(CollectionName::Cart, item))
        .await??;
    let notice = match outcome {
        AddOutcome::Incremented => Notice::UpdatedCartQuantity,
        AddOutcome::Added | AddOutcome::AlreadyPresent => Notice::AddedToCart,
    };
    add_breadcrumb(
        "cart",
        "Added product to cart",
        Some(&[("product_id", raw_id.as_str())]),
    );

    Ok(Redirect::to(&notice.redirect_target(&product_path(id))))
}

/// Add the product to the wishlist, or remove it if already there.
#[instrument(skip(state))]
pub async fn toggle_wishlist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect> {
    let id = parse_product_id(&raw_id)?;
    let product = fetch_product(&state, id).await?;

    let item = CollectionItem::from(&product);
    let toggled = state
        .with_collections(move |store| store.toggle_item(CollectionName::Wishlist, item))
        .await??;
    let notice = match toggled {
        Toggle::Added => Notice::AddedToWishlist,
        Toggle::Removed => Notice::RemovedFromWishlist,
    };

    Ok(Redirect::to(&notice.redirect_target(&product_path(id))))
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse::<ProductId>().map_err(|_| {
        tracing::debug!(raw, "Ignoring unusable product id");
        AppError::NotFound(PRODUCT_NOT_FOUND.to_string())
    })
}

async fn fetch_product(state: &AppState, id: ProductId) -> Result<Product> {
    state
        .catalog()
        .product(id)
        .await
        .map_err(|e| AppError::catalog(FAILED_TO_FETCH_PRODUCT, e))
}

fn product_path(id: ProductId) -> String {
    format!("/product/{id}")
}
