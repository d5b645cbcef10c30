//! Payment request body.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use storefront_checkout_core::StockId;
use thiserror::Error;

use crate::checkout::{CheckoutForm, digits, split_expiry};

/// Errors that prevent a payload from being assembled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// There is nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,
    /// The expiry field does not hold a full `MM / YY` value.
    #[error("card expiry must be MM / YY")]
    IncompleteExpiry,
}

/// Body of `POST /checkout/charge`.
///
/// Built once at submit time and never mutated afterwards; the fields are
/// private and only readable through accessors.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentPayload {
    products: Vec<StockId>,
    #[serde(rename = "promotionCode")]
    promotion_code: Option<String>,
    customer: CustomerParams,
    shipping: ShippingParams,
    payment: CardParams,
}

/// Customer identity with billing address.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub billing: AddressParams,
}

/// Postal address in the shape the payment service expects.
#[derive(Debug, Clone, Serialize)]
pub struct AddressParams {
    pub line1: String,
    pub line2: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
}

/// Recipient and delivery address.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingParams {
    pub name: String,
    pub phone: String,
    pub address: AddressParams,
}

/// Card details. Implements `Debug` manually to redact number and CVC.
#[derive(Clone, Serialize)]
pub struct CardParams {
    pub cc_name: String,
    #[serde(serialize_with = "serialize_secret")]
    pub cc_number: SecretString,
    pub exp_month: String,
    pub exp_year: String,
    #[serde(serialize_with = "serialize_secret")]
    pub cc_csc: SecretString,
}

impl std::fmt::Debug for CardParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardParams")
            .field("cc_name", &self.cc_name)
            .field("cc_number", &"[REDACTED]")
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cc_csc", &"[REDACTED]")
            .finish()
    }
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl PaymentPayload {
    /// Assemble a payload from the cart, the form and an optional promotion
    /// code. Blank promotion codes are sent as `null`.
    ///
    /// The card number is sent as bare digits and the expiry is split into
    /// month and year. Shipping reuses the customer's name, phone and
    /// address.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty or the expiry is incomplete.
    pub fn new(
        products: Vec<StockId>,
        promotion_code: Option<&str>,
        form: &CheckoutForm,
    ) -> Result<Self, PayloadError> {
        if products.is_empty() {
            return Err(PayloadError::EmptyCart);
        }
        let (exp_month, exp_year) =
            split_expiry(&form.cc_exp).ok_or(PayloadError::IncompleteExpiry)?;

        let address = AddressParams {
            line1: form.line1.trim().to_string(),
            line2: None,
            postal_code: form.postal_code.trim().to_string(),
            city: form.city.trim().to_string(),
            state: None,
            country: form.country.trim().to_string(),
        };

        Ok(Self {
            products,
            promotion_code: promotion_code
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            customer: CustomerParams {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone: form.phone.trim().to_string(),
                billing: address.clone(),
            },
            shipping: ShippingParams {
                name: form.name.trim().to_string(),
                phone: form.phone.trim().to_string(),
                address,
            },
            payment: CardParams {
                cc_name: form.cc_name.trim().to_string(),
                cc_number: SecretString::from(digits(&form.cc_number)),
                exp_month,
                exp_year,
                cc_csc: SecretString::from(form.cc_csc.trim().to_string()),
            },
        })
    }

    /// Stock ids being paid for, duplicates included.
    #[must_use]
    pub fn products(&self) -> &[StockId] {
        &self.products
    }

    /// Promotion code, if one was given.
    #[must_use]
    pub fn promotion_code(&self) -> Option<&str> {
        self.promotion_code.as_deref()
    }

    /// Customer details.
    #[must_use]
    pub const fn customer(&self) -> &CustomerParams {
        &self.customer
    }

    /// Shipping details.
    #[must_use]
    pub const fn shipping(&self) -> &ShippingParams {
        &self.shipping
    }

    /// Card details.
    #[must_use]
    pub const fn payment(&self) -> &CardParams {
        &self.payment
    }
}
