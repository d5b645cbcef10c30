//! Checkout form model and validity flags.

use serde::{Deserialize, Serialize};

/// Country preselected on a fresh form.
pub const DEFAULT_COUNTRY: &str = "SE";

/// Message shown when the email field is invalid.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address.";

/// Message shown when the form as a whole is invalid.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input.";

/// Everything the shopper enters at checkout.
///
/// Implements `Debug` manually to redact card fields.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub email: String,
    pub name: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    pub line1: String,
    pub postal_code: String,
    pub city: String,
    pub phone: String,
    /// Cardholder name
    pub cc_name: String,
    /// Card number as displayed (`4111 1111 ...`)
    pub cc_number: String,
    /// Expiry as displayed (`MM / YY`)
    pub cc_exp: String,
    pub cc_csc: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            line1: String::new(),
            postal_code: String::new(),
            city: String::new(),
            phone: String::new(),
            cc_name: String::new(),
            cc_number: String::new(),
            cc_exp: String::new(),
            cc_csc: String::new(),
        }
    }
}

impl std::fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("country", &self.country)
            .field("line1", &self.line1)
            .field("postal_code", &self.postal_code)
            .field("city", &self.city)
            .field("phone", &self.phone)
            .field("cc_name", &self.cc_name)
            .field("cc_number", &"[REDACTED]")
            .field("cc_exp", &self.cc_exp)
            .field("cc_csc", &"[REDACTED]")
            .finish()
    }
}

/// A sticky validity flag with a fixed user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub invalid: bool,
    pub message: &'static str,
}

impl Validity {
    /// A flag that starts out valid.
    #[must_use]
    pub const fn valid(message: &'static str) -> Self {
        Self {
            invalid: false,
            message,
        }
    }

    /// The message to show, if the flag is raised.
    #[must_use]
    pub const fn error(&self) -> Option<&'static str> {
        if self.invalid { Some(self.message) } else { None }
    }
}
