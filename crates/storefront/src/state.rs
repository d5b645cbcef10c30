//! Application state shared across front ends.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::payment::PaymentClient;
use crate::storage::FileStore;

/// Application state shared across commands.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the HTTP clients. Carts are not shared: each caller
/// opens its own [`CartStore`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    payments: PaymentClient,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("catalog", &self.inner.catalog)
            .field("payments", &self.inner.payments)
            .finish()
    }
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, AppError> {
        let catalog = CatalogClient::new(&config)?;
        let payments = PaymentClient::new(&config)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                payments,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the payment client.
    #[must_use]
    pub fn payments(&self) -> &PaymentClient {
        &self.inner.payments
    }

    /// Open the cart persisted under the configured data directory.
    #[must_use]
    pub fn cart_store(&self) -> CartStore<FileStore> {
        CartStore::new(FileStore::new(&self.inner.config.data_dir))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_state_uses_configured_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::with_api_address("http://127.0.0.1:9").unwrap();
        config.data_dir = dir.path().to_path_buf();

        let state = AppState::new(config).unwrap();
        let mut cart = state.cart_store();
        cart.add("s1".into()).unwrap();

        assert!(dir.path().join("cart.json").exists());
        assert_eq!(state.config().api_address.as_str(), "http://127.0.0.1:9/");
    }
}
