//! Catalog service client.
//!
//! # Architecture
//!
//! - Read-only JSON endpoints: `/sections/`, `/products/`, `/products/{id}`
//!   and `/stock/{ids}`
//! - Every accessor returns `Result<T, CatalogError>`; callers that only care
//!   about presence use `.ok()`
//! - Sections and products are cached via `moka` (TTL from configuration);
//!   `/stock/` is always fetched fresh
//! - Quantities embedded in a cached [`Product`] may be up to one TTL old.
//!   Availability checks go through [`CatalogClient::hydrate_cart`]
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_checkout::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config)?;
//!
//! let sections = client.fetch_sections().await?;
//! let product = client.fetch_product(&ProductId::new("65a1")).await.ok();
//! let cart = client.hydrate_cart(&cart_store.load()).await?;
//! ```

mod cache;
mod hydrate;
pub mod types;

pub use hydrate::{CartLine, HydratedCart, distinct_ids, hydrate};
pub use types::*;

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use storefront_checkout_core::{ProductId, StockId};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{MAX_CACHE_TTL, StorefrontConfig};
use cache::{CacheKey, CacheValue};

/// Errors that can occur when reading from the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection refused, timeout, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Returns true if the service reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if the request never produced a usable response.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog endpoints.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    config: StorefrontConfig,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("api_address", &self.inner.config.api_address.as_str())
            .field("cached_entries", &self.inner.cache.entry_count())
            .finish()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl.min(MAX_CACHE_TTL))
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: config.http_client()?,
                config: config.clone(),
                cache,
            }),
        })
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.inner.config.endpoint(path);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(path, "Catalog resource not found");
            return Err(CatalogError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog service returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Section Methods
    // =========================================================================

    /// Get every section with its categories and collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn fetch_sections(&self) -> Result<Vec<Section>, CatalogError> {
        if let Some(CacheValue::Sections(sections)) =
            self.inner.cache.get(&CacheKey::Sections).await
        {
            debug!("Cache hit for sections");
            return Ok(sections);
        }

        let sections: Vec<Section> = self.get_json("sections/").await?;

        self.inner
            .cache
            .insert(CacheKey::Sections, CacheValue::Sections(sections.clone()))
            .await;

        Ok(sections)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get every product.
    ///
    /// Cached; the embedded `stock[].quantity` may be stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("products/").await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// Cached; the embedded `stock[].quantity` may be stale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the product does not exist, or
    /// another error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(id.clone());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let path = format!("products/{}", urlencoding::encode(id.as_str()));
        let product: Product = self.get_json(&path).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Stock Methods
    // =========================================================================

    /// Get stock records, each with its product embedded.
    ///
    /// The response order is not guaranteed to match `ids`; match results
    /// by [`HydratedStock::id`]. An empty `ids` returns an empty list
    /// without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with a
    /// non-success status.
    #[instrument(skip_all, fields(count = ids.len()))]
    pub async fn fetch_products_by_stock_id(
        &self,
        ids: &[StockId],
    ) -> Result<Vec<HydratedStock>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(|id| urlencoding::encode(id.as_str()).into_owned())
            .collect::<Vec<_>>()
            .join(",");

        self.get_json(&format!("stock/{joined}")).await
    }

    /// Resolve a cart into priced lines.
    ///
    /// Duplicate entries are requested once and folded into the line
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the stock request fails.
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub async fn hydrate_cart(&self, entries: &[StockId]) -> Result<HydratedCart, CatalogError> {
        let stocks = self.fetch_products_by_stock_id(&distinct_ids(entries)).await?;
        let cart = hydrate(entries, stocks);

        if !cart.missing.is_empty() {
            debug!(missing = ?cart.missing, "Cart references unknown stock");
        }

        Ok(cart)
    }

    /// Drop every cached catalog response.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }
}
