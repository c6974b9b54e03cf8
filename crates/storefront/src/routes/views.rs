//! Display data for templates.
//!
//! Templates only see preformatted strings; prices are formatted here with
//! two decimals.

use misterdesign_core::collection::{total, unit_count};
use misterdesign_core::{CollectionItem, Product};

/// Product card on the listing page.
#[derive(Clone)]
pub struct ProductCardView {
    pub url: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            url: format!("/product/{}", product.id),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}

/// Product on the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub price: String,
    /// CSS class per star, five entries.
    pub stars: Vec<&'static str>,
    pub review_count: u32,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let (filled, review_count) = product
            .rating
            .map_or((0, 0), |rating| (rating.filled_stars(), rating.count));

        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: product.price.display(),
            stars: (0..5)
                .map(|i| if i < filled { "star star-filled" } else { "star" })
                .collect(),
            review_count,
        }
    }
}

/// A cart or wishlist line.
#[derive(Clone)]
pub struct ItemView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    /// Quantity submitted by the minus button. Zero removes the line.
    pub quantity_less: u32,
    pub quantity_more: u32,
    pub line_total: String,
}

impl From<&CollectionItem> for ItemView {
    fn from(item: &CollectionItem) -> Self {
        Self {
            id: item.id.to_string(),
            url: format!("/product/{}", item.id),
            title: item.title.clone(),
            description: item.description.clone(),
            category: item.category.clone(),
            image: item.image.clone(),
            price: item.price.display(),
            quantity: item.quantity,
            quantity_less: item.quantity.saturating_sub(1),
            quantity_more: item.quantity.saturating_add(1),
            line_total: item.line_total().display(),
        }
    }
}

/// A whole cart or wishlist.
#[derive(Clone)]
pub struct CollectionView {
    pub items: Vec<ItemView>,
    pub total: String,
    pub unit_count: u32,
}

impl From<&[CollectionItem]> for CollectionView {
    fn from(items: &[CollectionItem]) -> Self {
        Self {
            items: items.iter().map(ItemView::from).collect(),
            total: total(items).display(),
            unit_count: unit_count(items),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use misterdesign_core::{Price, ProductId, Rating};

    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new(2),
            title: "Mens Casual Premium Slim Fit T-Shirts".to_string(),
            price: Price::from_cents(2230),
            category: "men's clothing".to_string(),
            description: "Slim-fitting style".to_string(),
            image: "https://fakestoreapi.com/img/71-3HjGNDUL.jpg".to_string(),
            rating: Some(Rating {
                rate: 4.1,
                count: 259,
            }),
        }
    }

    #[test]
    fn test_detail_view_stars() {
        let view = ProductDetailView::from(&product());
        assert_eq!(view.stars.len(), 5);
        assert_eq!(
            view.stars.iter().filter(|s| **s == "star star-filled").count(),
            4
        );
        assert_eq!(view.review_count, 259);
        assert_eq!(view.price, "$22.30");
    }

    #[test]
    fn test_detail_view_without_rating() {
        let mut product = product();
        product.rating = None;
        let view = ProductDetailView::from(&product);
        assert!(view.stars.iter().all(|s| *s == "star"));
        assert_eq!(view.review_count, 0);
    }

    #[test]
    fn test_collection_view_totals() {
        let mut shirt = CollectionItem::from(&product());
        shirt.quantity = 2;
        let items = vec![shirt];

        let view = CollectionView::from(items.as_slice());
        assert_eq!(view.total, "$44.60");
        assert_eq!(view.unit_count, 2);
        assert_eq!(view.items[0].line_total, "$44.60");
        assert_eq!(view.items[0].url, "/product/2");
        assert_eq!(view.items[0].quantity_less, 1);
        assert_eq!(view.items[0].quantity_more, 3);
    }
}
