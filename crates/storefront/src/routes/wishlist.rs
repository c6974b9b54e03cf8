//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use misterdesign_core::CollectionName;
use tracing::instrument;

use super::cart::{ItemForm, find_item};
use super::notice::{Notice, NoticeQuery, Toast};
use super::views::CollectionView;
use crate::error::Result;
use crate::state::AppState;

const WISHLIST_PATH: &str = "/wishlist";

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub wishlist: CollectionView,
    pub toast: Option<Toast>,
}

/// Display wishlist page.
#[instrument(skip(state, query))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<WishlistShowTemplate> {
    let items = state
        .with_collections(|store| store.load(CollectionName::Wishlist))
        .await?;

    Ok(WishlistShowTemplate {
        wishlist: CollectionView::from(items.as_slice()),
        toast: Toast::from_query(&query, None),
    })
}

/// Remove an item from the wishlist.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<ItemForm>) -> Result<Redirect> {
    let id = form.id;
    let removed = state
        .with_collections(move |store| store.remove_item(CollectionName::Wishlist, id))
        .await??;

    if removed == 0 {
        return Ok(Redirect::to(WISHLIST_PATH));
    }
    Ok(Redirect::to(
        &Notice::RemovedFromWishlist.redirect_target(WISHLIST_PATH),
    ))
}

/// Put a copy of a wishlist item in the cart. The item stays on the wishlist.
#[instrument(skip(state))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect> {
    let Some(item) = find_item(&state, CollectionName::Wishlist, form.id).await? else {
        return Ok(Redirect::to(WISHLIST_PATH));
    };

    state
        .with_collections(move |store| store.add_item(CollectionName::Cart, item))
        .await??;

    Ok(Redirect::to(
        &Notice::CopiedToCart.redirect_target(WISHLIST_PATH),
    ))
}

/// Move a wishlist item into the cart.
#[instrument(skip(state))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect> {
    let Some(item) = find_item(&state, CollectionName::Wishlist, form.id).await? else {
        return Ok(Redirect::to(WISHLIST_PATH));
    };

    state
        .with_collections(move |store| {
            store.move_item(CollectionName::Wishlist, CollectionName::Cart, item)
        })
        .await??;

    Ok(Redirect::to(
        &Notice::MovedToCart.redirect_target(WISHLIST_PATH),
    ))
}
