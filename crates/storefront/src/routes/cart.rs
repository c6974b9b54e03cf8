//! Cart route handlers.
//!
//! The cart lives in the persisted collection store. Every action is a form
//! POST that mutates the store and redirects back to `/cart` with a notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use misterdesign_core::{CollectionItem, CollectionName, ProductId, collection};
use serde::Deserialize;
use tracing::instrument;

use super::notice::{Notice, NoticeQuery, Toast};
use super::views::CollectionView;
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

const CART_PATH: &str = "/cart";

/// Form naming one cart or wishlist item.
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub id: ProductId,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: ProductId,
    pub quantity: u32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CollectionView,
    pub toast: Option<Toast>,
}

/// Display cart page.
#[instrument(skip(state, query))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<CartShowTemplate> {
    let items = state
        .with_collections(|store| store.load(CollectionName::Cart))
        .await?;

    Ok(CartShowTemplate {
        cart: CollectionView::from(items.as_slice()),
        toast: Toast::from_query(&query, None),
    })
}

/// Set the quantity of a cart item. Zero removes it.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let UpdateCartForm { id, quantity } = form;
    let found = state
        .with_collections(move |store| store.set_quantity(CollectionName::Cart, id, quantity))
        .await??;

    let target = match (found, form.quantity) {
        (false, _) => CART_PATH.to_string(),
        (true, 0) => Notice::RemovedFromCart.redirect_target(CART_PATH),
        (true, _) => Notice::UpdatedCartQuantity.redirect_target(CART_PATH),
    };
    Ok(Redirect::to(&target))
}

/// Remove an item from the cart.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<ItemForm>) -> Result<Redirect> {
    let id = form.id;
    let removed = state
        .with_collections(move |store| store.remove_item(CollectionName::Cart, id))
        .await??;

    if removed == 0 {
        return Ok(Redirect::to(CART_PATH));
    }
    Ok(Redirect::to(
        &Notice::RemovedFromCart.redirect_target(CART_PATH),
    ))
}

/// Move an item from the cart to the wishlist.
#[instrument(skip(state))]
pub async fn move_to_wishlist(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect> {
    let Some(item) = find_item(&state, CollectionName::Cart, form.id).await? else {
        return Ok(Redirect::to(CART_PATH));
    };

    state
        .with_collections(move |store| {
            store.move_item(CollectionName::Cart, CollectionName::Wishlist, item)
        })
        .await??;

    Ok(Redirect::to(
        &Notice::MovedToWishlist.redirect_target(CART_PATH),
    ))
}

/// Confirm the order and go home.
///
/// There is no payment step; the cart is left as is.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Redirect> {
    let items = state
        .with_collections(|store| store.load(CollectionName::Cart))
        .await?;
    if items.is_empty() {
        return Ok(Redirect::to(CART_PATH));
    }

    let total = collection::total(&items);
    tracing::info!(
        lines = items.len(),
        units = collection::unit_count(&items),
        total = %total,
        "Checkout confirmed"
    );
    add_breadcrumb("cart", "Checkout confirmed", None);

    Ok(Redirect::to(&Notice::CheckoutComplete.redirect_target("/")))
}

/// First item with `id` in the collection.
pub(super) async fn find_item(
    state: &AppState,
    name: CollectionName,
    id: ProductId,
) -> Result<Option<CollectionItem>> {
    state
        .with_collections(move |store| store.load(name).into_iter().find(|item| item.id == id))
        .await
}
