//! Cache types for catalog responses.

use storefront_checkout_core::ProductId;

use super::types::{Product, Section};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Sections,
    Products,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Sections(Vec<Section>),
    Products(Vec<Product>),
    Product(Box<Product>),
}
