//! Product records and the items stored in collections.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Average review score and review count for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating on a 0-5 scale.
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}

impl Rating {
    /// Number of filled stars out of five (the rate rounded down).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=5 first
    pub fn filled_stars(&self) -> usize {
        self.rate.clamp(0.0, 5.0).floor() as usize
    }
}

/// A product as returned by the product API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// An entry in a cart or wishlist.
///
/// This is the one item schema shared by every page. Records written with a
/// `name` field instead of `title` are accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub id: ProductId,
    #[serde(default, alias = "name")]
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl CollectionItem {
    /// Build an item for `product`. A quantity of zero is raised to one.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            category: product.category.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            rating: product.rating,
            quantity: quantity.max(1),
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<&Product> for CollectionItem {
    fn from(product: &Product) -> Self {
        Self::from_product(product, 1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const API_PRODUCT: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_decode_api_product() {
        let product: Product = serde_json::from_str(API_PRODUCT).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(10_995));
        assert_eq!(product.category, "men's clothing");
        let rating = product.rating.unwrap();
        assert_eq!(rating.count, 120);
        assert_eq!(rating.filled_stars(), 3);
    }

    #[test]
    fn test_item_from_product_keeps_display_fields() {
        let product: Product = serde_json::from_str(API_PRODUCT).unwrap();
        let item = CollectionItem::from_product(&product, 2);
        assert_eq!(item.title, product.title);
        assert_eq!(item.quantity, 2);
        assert_eq!(item.line_total(), Price::from_cents(21_990));
    }

    #[test]
    fn test_item_from_product_raises_zero_quantity() {
        let product: Product = serde_json::from_str(API_PRODUCT).unwrap();
        assert_eq!(CollectionItem::from_product(&product, 0).quantity, 1);
    }

    #[test]
    fn test_legacy_name_field_reads_as_title() {
        let item: CollectionItem = serde_json::from_str(
            r#"{"id": 5, "name": "Desk lamp", "price": 24.5, "image": "", "description": "Brass"}"#,
        )
        .unwrap();
        assert_eq!(item.title, "Desk lamp");
        assert_eq!(item.quantity, 1);
        assert!(item.rating.is_none());
        assert!(item.category.is_empty());
    }

    #[test]
    fn test_item_serializes_title_not_name() {
        let item: CollectionItem =
            serde_json::from_str(r#"{"id": 5, "name": "Desk lamp", "price": 24.5}"#).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["title"], "Desk lamp");
        assert!(json.get("name").is_none());
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn test_filled_stars_clamped() {
        assert_eq!(Rating { rate: 7.2, count: 1 }.filled_stars(), 5);
        assert_eq!(Rating { rate: -1.0, count: 1 }.filled_stars(), 0);
        assert_eq!(Rating { rate: 4.99, count: 1 }.filled_stars(), 4);
    }
}
