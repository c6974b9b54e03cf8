//! Product API commands.

use misterdesign_core::ProductId;
use misterdesign_storefront::catalog::{CatalogClient, ProductSource};
use tracing::info;

use super::CommandError;

/// Print every product.
///
/// # Errors
///
/// Returns an error if the product API request fails.
pub async fn list(catalog: &CatalogClient) -> Result<(), CommandError> {
    let products = catalog.products().await?;
    for product in &products {
        info!(
            "#{:<4} {:<50} {:>9}  {}",
            product.id,
            product.title,
            product.price.display(),
            product.category
        );
    }
    info!("{} product(s)", products.len());
    Ok(())
}

/// Print one product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
pub async fn show(catalog: &CatalogClient, id: ProductId) -> Result<(), CommandError> {
    let product = catalog.product(id).await?;

    info!("#{} {}", product.id, product.title);
    info!("Category: {}", product.category);
    info!("Price:    {}", product.price.display());
    if let Some(rating) = product.rating {
        info!("Rating:   {:.1} ({} reviews)", rating.rate, rating.count);
    }
    info!("Image:    {}", product.image);
    info!("{}", product.description);
    Ok(())
}
