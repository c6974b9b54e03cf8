//! Cart and wishlist commands.
//!
//! # Usage
//!
//! ```bash
//! md-cli cart list
//! md-cli cart remove 3
//! md-cli wishlist move-to-cart 3
//! md-cli wishlist clear
//! ```

use misterdesign_core::collection::{total, unit_count};
use misterdesign_core::{CollectionItem, CollectionName, CollectionStore, ProductId};
use tracing::info;

use super::CommandError;

/// Print every item of a collection with its line total.
///
/// Returns the items that were printed.
pub fn list(store: &CollectionStore, name: CollectionName) -> Vec<CollectionItem> {
    let items = store.load(name);
    if items.is_empty() {
        info!("Your {name} is empty");
        return items;
    }

    for item in &items {
        info!(
            "#{:<4} {:<50} {:>3} x {:>9} = {:>10}",
            item.id,
            item.title,
            item.quantity,
            item.price.display(),
            item.line_total().display()
        );
    }
    info!(
        "{} line(s), {} unit(s), total {}",
        items.len(),
        unit_count(&items),
        total(&items).display()
    );
    items
}

/// Remove a product from a collection.
///
/// # Errors
///
/// Returns an error if the product is not in the collection or the file
/// cannot be written.
pub fn remove(
    store: &CollectionStore,
    name: CollectionName,
    id: ProductId,
) -> Result<(), CommandError> {
    if store.remove_item(name, id)? == 0 {
        return Err(CommandError::NotInCollection {
            id,
            collection: name,
        });
    }
    info!("Removed product {id} from the {name}");
    Ok(())
}

/// Move a product from the wishlist into the cart.
///
/// # Errors
///
/// Returns an error if the product is not on the wishlist or the file cannot
/// be written.
pub fn move_to_cart(store: &CollectionStore, id: ProductId) -> Result<(), CommandError> {
    let item = store
        .load(CollectionName::Wishlist)
        .into_iter()
        .find(|item| item.id == id)
        .ok_or(CommandError::NotInCollection {
            id,
            collection: CollectionName::Wishlist,
        })?;

    let title = item.title.clone();
    store.move_item(CollectionName::Wishlist, CollectionName::Cart, item)?;
    info!("Moved {title} to the cart");
    Ok(())
}

/// Delete every item of a collection.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn clear(store: &CollectionStore, name: CollectionName) -> Result<(), CommandError> {
    store.clear(name)?;
    info!("Cleared the {name}");
    Ok(())
}
