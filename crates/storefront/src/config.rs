//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_ADDRESS` - Base URL of the catalog/payment service
//!
//! ## Optional
//! - `STOREFRONT_DATA_DIR` - Directory for the durable cart store (default: .storefront)
//! - `STOREFRONT_CACHE_TTL_SECS` - Catalog cache lifetime in seconds (default: 300, max: 31536000)
//! - `STOREFRONT_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: none)
//! - `STOREFRONT_CURRENCY` - Display currency for prices (default: SEK)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use storefront_checkout_core::CurrencyCode;
use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".storefront";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Longest accepted catalog cache lifetime (one year).
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the catalog/payment service
    pub api_address: Url,
    /// Directory holding the durable key-value entries (the cart)
    pub data_dir: PathBuf,
    /// Lifetime of cached catalog responses
    pub cache_ttl: Duration,
    /// Optional per-request timeout; requests never time out when unset
    pub request_timeout: Option<Duration>,
    /// Currency used when rendering prices
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_address = parse_api_address(&get_required_env("STOREFRONT_API_ADDRESS")?)?;
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", DEFAULT_DATA_DIR));
        let cache_ttl = parse_cache_ttl(&get_env_or_default(
            "STOREFRONT_CACHE_TTL_SECS",
            &DEFAULT_CACHE_TTL_SECS.to_string(),
        ))?;
        let request_timeout = get_optional_env("STOREFRONT_REQUEST_TIMEOUT_SECS")
            .map(|v| parse_secs("STOREFRONT_REQUEST_TIMEOUT_SECS", &v))
            .transpose()?
            .map(Duration::from_secs);
        let currency = get_env_or_default("STOREFRONT_CURRENCY", "SEK")
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_CURRENCY".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_address,
            data_dir,
            cache_ttl,
            request_timeout,
            currency,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration pointing at `api_address` with every optional setting
    /// at its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the address is not an
    /// absolute http(s) URL.
    pub fn with_api_address(api_address: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_address: parse_api_address(api_address)?,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: None,
            currency: CurrencyCode::default(),
            sentry_dsn: None,
            sentry_environment: None,
        })
    }

    /// Absolute URL for a service path such as `products/abc`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_address.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build the HTTP client shared by the catalog and payment clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and check the service base URL.
fn parse_api_address(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::InvalidEnvVar("STOREFRONT_API_ADDRESS".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_API_ADDRESS".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a whole number of seconds.
fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the catalog cache lifetime, bounded by [`MAX_CACHE_TTL`].
fn parse_cache_ttl(value: &str) -> Result<Duration, ConfigError> {
    let ttl = Duration::from_secs(parse_secs("STOREFRONT_CACHE_TTL_SECS", value)?);
    if ttl > MAX_CACHE_TTL {
        return Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_CACHE_TTL_SECS".to_string(),
            format!("must be at most {} seconds", MAX_CACHE_TTL.as_secs()),
        ));
    }
    Ok(ttl)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
