//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that front ends convert component errors
//! into. Failures that point at the backend or the local store are captured
//! to Sentry by [`AppError::report`]; shopper mistakes are only logged.

use storefront_checkout_core::PriceError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::payment::PaymentError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Local key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Payment request failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Cart total could not be computed.
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    /// Bad input from the shopper.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Returns true if the error is the shopper's to fix rather than ours.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest(_)
                | Self::Catalog(CatalogError::NotFound(_))
                | Self::Checkout(CheckoutError::InvalidInput(_) | CheckoutError::Payload(_))
        )
    }

    /// Log the error, capturing it to Sentry unless it is a user error.
    pub fn report(&self) {
        if self.is_user_error() {
            tracing::warn!(error = %self, "Request rejected");
            return;
        }

        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("stock_id", "s1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("unknown command".to_string());
        assert_eq!(err.to_string(), "Bad request: unknown command");

        let err = AppError::from(CatalogError::NotFound("products/p9".to_string()));
        assert_eq!(err.to_string(), "Catalog error: Not found: products/p9");
    }

    #[test]
    fn test_user_errors_are_not_captured() {
        assert!(AppError::BadRequest("x".to_string()).is_user_error());
        assert!(AppError::from(CatalogError::NotFound("x".to_string())).is_user_error());
        assert!(AppError::from(CheckoutError::InvalidInput(vec!["email"])).is_user_error());

        let server = AppError::from(PaymentError::Status {
            status: 500,
            message: "boom".to_string(),
        });
        assert!(!server.is_user_error());
    }

    #[test]
    fn test_report_without_sentry_client() {
        // No client bound: capture is a no-op and must not panic.
        AppError::BadRequest("x".to_string()).report();
        AppError::from(ConfigError::MissingEnvVar("STOREFRONT_API_ADDRESS".to_string())).report();
    }
}
