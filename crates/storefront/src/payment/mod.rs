//! Payment submitter.
//!
//! A single-attempt `POST /checkout/charge`. The outcome is tri-state:
//!
//! - `Ok(PaymentStatus::Ok { .. })` - the charge went through
//! - `Ok(PaymentStatus::Error { .. })` - the service answered and declined
//! - `Err(PaymentError)` - no usable answer (transport failure, non-success
//!   status, unparsable body)
//!
//! There is no retry or backoff; retry policy belongs to the caller.

mod payload;

pub use payload::{
    AddressParams, CardParams, CustomerParams, PayloadError, PaymentPayload, ShippingParams,
};

use std::sync::Arc;

use storefront_checkout_core::PaymentStatus;
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::StorefrontConfig;

/// Path of the charge endpoint.
const CHARGE_PATH: &str = "checkout/charge";

/// Header carrying the per-attempt request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Errors that leave a payment attempt without a status.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body is not a payment status.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PaymentError {
    /// Returns true if the request never produced a usable response.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Client for the charge endpoint.
#[derive(Clone)]
pub struct PaymentClient {
    inner: Arc<PaymentClientInner>,
}

struct PaymentClientInner {
    client: reqwest::Client,
    endpoint: String,
}

impl std::fmt::Debug for PaymentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentClient")
            .field("endpoint", &self.inner.endpoint)
            .finish_non_exhaustive()
    }
}

impl PaymentClient {
    /// Create a new payment client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, PaymentError> {
        Ok(Self {
            inner: Arc::new(PaymentClientInner {
                client: config.http_client()?,
                endpoint: config.endpoint(CHARGE_PATH),
            }),
        })
    }

    /// Submit a payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not a payment status. A declined
    /// charge is not an error: it is `Ok(PaymentStatus::Error { .. })`.
    #[instrument(skip_all, fields(request_id = tracing::field::Empty, items = payload.products().len()))]
    pub async fn send_payment(
        &self,
        payload: &PaymentPayload,
    ) -> Result<PaymentStatus, PaymentError> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("Content-Type", "application/json")
            .header(REQUEST_ID_HEADER, &request_id)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Payment service returned non-success status"
            );
            return Err(PaymentError::Status {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        let payment_status: PaymentStatus = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse payment response"
            );
            e
        })?;

        info!(status = %payment_status, "Payment request completed");
        Ok(payment_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_error_display() {
        let err = PaymentError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 502 - bad gateway");
        assert!(!err.is_transport());
    }
}
