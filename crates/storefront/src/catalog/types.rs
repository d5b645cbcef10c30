//! Domain types for the catalog service.
//!
//! Field names follow the service's JSON (`_id`, `articleNumber`, ...). All
//! catalog data is read-only from the client's perspective.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_checkout_core::{
    CategoryId, CollectionId, CurrencyCode, Price, ProductId, SectionId, StockId,
};

// =============================================================================
// Section Types
// =============================================================================

/// Top level of the navigation hierarchy (e.g. "Women").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "_id")]
    pub id: SectionId,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Promotional tiles shown with the section.
    #[serde(default)]
    pub featured: Vec<Featured>,
}

impl Section {
    /// Find a category of this section by id.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Find a collection anywhere below this section.
    #[must_use]
    pub fn collection(&self, id: &CollectionId) -> Option<&Collection> {
        self.categories.iter().find_map(|c| c.collection(id))
    }
}

/// Second level of the hierarchy (e.g. "Shoes").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
    /// Owning section. Lookup only.
    pub parent: SectionId,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl Category {
    /// Find a collection of this category by id.
    #[must_use]
    pub fn collection(&self, id: &CollectionId) -> Option<&Collection> {
        self.collections.iter().find(|c| &c.id == id)
    }
}

/// Leaf of the hierarchy (e.g. "Sneakers").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "_id")]
    pub id: CollectionId,
    pub name: String,
    #[serde(default)]
    pub views: u64,
    /// Owning category. Lookup only.
    pub parent: CategoryId,
}

/// A featured tile linking somewhere in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Featured {
    pub name: String,
    pub href: String,
    pub image: String,
    pub alt: String,
}

/// Resolve the section that owns `category` through its back-reference.
#[must_use]
pub fn parent_section<'a>(sections: &'a [Section], category: &Category) -> Option<&'a Section> {
    sections.iter().find(|s| s.id == category.parent)
}

// =============================================================================
// Product Types
// =============================================================================

/// Stored product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Object storage key.
    pub key: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub content_type: String,
}

/// A product with its stock variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "articleNumber")]
    pub article_number: u64,
    #[serde(default)]
    pub stock: Vec<Stock>,
    pub image: Image,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub views: u64,
    pub timestamp: DateTime<Utc>,
}

impl Product {
    /// Find a stock variant by id.
    #[must_use]
    pub fn variant(&self, id: &StockId) -> Option<&Stock> {
        self.stock.iter().find(|s| &s.id == id)
    }

    /// Returns true if any variant has units available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.iter().any(|s| s.quantity > 0)
    }

    /// Lowest variant price, if the product has variants.
    #[must_use]
    pub fn lowest_price(&self, currency: CurrencyCode) -> Option<Price> {
        self.stock.iter().map(|s| s.price(currency)).min_by_key(|p| p.minor_units)
    }
}

/// A priced, sized, quantity-tracked variant referencing its product by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "_id")]
    pub id: StockId,
    pub product: ProductId,
    pub size: String,
    /// Price in minor currency units.
    pub price: i64,
    /// Units available.
    pub quantity: u32,
}

impl Stock {
    /// Price in the given currency.
    #[must_use]
    pub const fn price(&self, currency: CurrencyCode) -> Price {
        Price::from_minor(self.price, currency)
    }
}

/// A stock variant with its product embedded (the `/stock/` response shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydratedStock {
    #[serde(rename = "_id")]
    pub id: StockId,
    pub product: Product,
    pub size: String,
    /// Price in minor currency units.
    pub price: i64,
    /// Units available.
    pub quantity: u32,
}

impl HydratedStock {
    /// Price in the given currency.
    #[must_use]
    pub const fn price(&self, currency: CurrencyCode) -> Price {
        Price::from_minor(self.price, currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_json() -> serde_json::Value {
        json!({
            "_id": "p1",
            "name": "Canvas Sneaker",
            "articleNumber": 100_234,
            "stock": [
                {"_id": "s1", "product": "p1", "size": "42", "price": 89_900, "quantity": 3},
                {"_id": "s2", "product": "p1", "size": "43", "price": 79_900, "quantity": 0}
            ],
            "image": {"key": "sneaker.jpg", "type": "image/jpeg"},
            "collections": [],
            "views": 12,
            "timestamp": "2024-03-01T10:00:00.000Z"
        })
    }

    #[test]
    fn test_product_deserializes_service_shape() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.article_number, 100_234);
        assert_eq!(product.image.content_type, "image/jpeg");
        assert_eq!(product.stock.len(), 2);
        assert!(product.in_stock());
        assert_eq!(
            product.variant(&StockId::new("s2")).map(|s| s.size.as_str()),
            Some("43")
        );
        assert_eq!(
            product.lowest_price(CurrencyCode::SEK).map(|p| p.minor_units),
            Some(79_900)
        );
    }

    #[test]
    fn test_hydrated_stock_embeds_product() {
        let stock: HydratedStock = serde_json::from_value(json!({
            "_id": "s1",
            "product": product_json(),
            "size": "42",
            "price": 89_900,
            "quantity": 3
        }))
        .unwrap();
        assert_eq!(stock.product.name, "Canvas Sneaker");
        assert_eq!(stock.price(CurrencyCode::SEK).to_string(), "899.00 SEK");
    }

    #[test]
    fn test_bare_stock_is_not_a_hydrated_stock() {
        let bare = json!({"_id": "s1", "product": "p1", "size": "42", "price": 1, "quantity": 1});
        assert!(serde_json::from_value::<HydratedStock>(bare).is_err());
    }

    #[test]
    fn test_section_lookups_follow_back_references() {
        let sections: Vec<Section> = serde_json::from_value(json!([{
            "_id": "sec1",
            "name": "Women",
            "categories": [{
                "_id": "cat1",
                "name": "Shoes",
                "parent": "sec1",
                "collections": [{"_id": "col1", "name": "Sneakers", "views": 4, "parent": "cat1"}]
            }],
            "featured": [{"name": "New in", "href": "/new", "image": "new.jpg", "alt": "New"}]
        }]))
        .unwrap();

        let section = sections.first().unwrap();
        let category = section.category(&CategoryId::new("cat1")).unwrap();
        assert_eq!(
            parent_section(&sections, category).map(|s| s.name.as_str()),
            Some("Women")
        );
        let collection = section.collection(&CollectionId::new("col1")).unwrap();
        assert_eq!(collection.parent, category.id);
        assert_eq!(section.featured.len(), 1);
    }
}
