//! Checkout session: the form, its validity flags and the submit action.

use storefront_checkout_core::{Email, PaymentStatus};
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::format::{digits, format_card_expiry, format_card_number, split_expiry};
use super::form::{CheckoutForm, INVALID_EMAIL_MESSAGE, INVALID_INPUT_MESSAGE, Validity};
use crate::cart::CartStore;
use crate::error::add_breadcrumb;
use crate::payment::{PayloadError, PaymentClient, PaymentError, PaymentPayload};
use crate::storage::{KeyValueStore, StorageError};

/// Accepted card number lengths (ISO/IEC 7812 PAN).
const CARD_DIGITS: std::ops::RangeInclusive<usize> = 12..=19;

/// Accepted CVC lengths.
const CVC_DIGITS: std::ops::RangeInclusive<usize> = 3..=4;

/// Errors that stop a submission before or after the payment request.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form failed validation; the `validation` flag is raised.
    #[error("Invalid input: {}", .0.join(", "))]
    InvalidInput(Vec<&'static str>),

    /// The payload could not be assembled.
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    /// The payment request produced no status.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// The charge succeeded but the cart could not be emptied.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// One shopper's pass through checkout.
///
/// Created when checkout starts and dropped when it ends; nothing about the
/// form outlives the session.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    form: CheckoutForm,
    email_validation: Validity,
    validation: Validity,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSession {
    /// Start a session with a default form and both flags valid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: CheckoutForm::default(),
            email_validation: Validity::valid(INVALID_EMAIL_MESSAGE),
            validation: Validity::valid(INVALID_INPUT_MESSAGE),
        }
    }

    /// The current form.
    #[must_use]
    pub const fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Mutable access for plain text fields (name, address, phone...).
    pub const fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// Email validity flag.
    #[must_use]
    pub const fn email_validation(&self) -> Validity {
        self.email_validation
    }

    /// Whole-form validity flag.
    #[must_use]
    pub const fn validation(&self) -> Validity {
        self.validation
    }

    // =========================================================================
    // Input Handlers
    // =========================================================================

    /// Check `value` against the email shape and update the email flag.
    ///
    /// Does not touch the form's email field.
    pub fn validate_email(&mut self, value: &str) -> bool {
        let valid = Email::is_valid(value);
        self.email_validation.invalid = !valid;
        valid
    }

    /// Store the email field and validate it.
    pub fn input_email(&mut self, value: &str) -> bool {
        self.form.email = value.to_string();
        self.validate_email(value)
    }

    /// Format a raw card number, store it, and return the value to show in
    /// the input control.
    pub fn input_card_number(&mut self, raw: &str) -> &str {
        self.form.cc_number = format_card_number(raw);
        &self.form.cc_number
    }

    /// Format a raw expiry, store it, and return the value to show in the
    /// input control.
    pub fn input_card_expiry(&mut self, raw: &str) -> &str {
        self.form.cc_exp = format_card_expiry(raw);
        &self.form.cc_exp
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validate every field and update the `validation` flag.
    ///
    /// Returns the names of the fields that failed.
    pub fn validate(&mut self) -> Vec<&'static str> {
        let form = &self.form;
        let mut failed = Vec::new();

        let required = [
            ("name", &form.name),
            ("country", &form.country),
            ("line1", &form.line1),
            ("postal_code", &form.postal_code),
            ("city", &form.city),
            ("phone", &form.phone),
            ("cc_name", &form.cc_name),
        ];
        failed.extend(
            required
                .iter()
                .filter(|(_, value)| value.trim().is_empty())
                .map(|(field, _)| *field),
        );

        if !Email::is_valid(&form.email) {
            failed.push("email");
        }
        if !CARD_DIGITS.contains(&digits(&form.cc_number).len()) {
            failed.push("cc_number");
        }
        if !valid_expiry(&form.cc_exp) {
            failed.push("cc_exp");
        }
        let csc = form.cc_csc.trim();
        if !(CVC_DIGITS.contains(&csc.len()) && csc.chars().all(|c| c.is_ascii_digit())) {
            failed.push("cc_csc");
        }

        self.email_validation.invalid = failed.contains(&"email");
        self.validation.invalid = !failed.is_empty();
        failed
    }

    /// Validate, build the payload from the stored cart and send it.
    ///
    /// On `PaymentStatus::Ok` the cart is emptied. A declined charge leaves
    /// the cart untouched so the shopper can try again.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the cart is empty, the payment
    /// request produces no status, or the cart cannot be cleared afterwards.
    #[instrument(skip_all, fields(has_promotion = promotion_code.is_some()))]
    pub async fn submit<S: KeyValueStore>(
        &mut self,
        cart: &mut CartStore<S>,
        payments: &PaymentClient,
        promotion_code: Option<&str>,
    ) -> Result<PaymentStatus, CheckoutError> {
        let failed = self.validate();
        if !failed.is_empty() {
            warn!(fields = ?failed, "Checkout form failed validation");
            return Err(CheckoutError::InvalidInput(failed));
        }

        let payload = PaymentPayload::new(cart.load(), promotion_code, &self.form)?;
        let items = payload.products().len().to_string();
        add_breadcrumb(
            "checkout",
            "Submitting payment",
            Some(&[("items", items.as_str())]),
        );

        let status = payments.send_payment(&payload).await?;

        if status.is_ok() {
            cart.clear()?;
            info!("Payment accepted, cart cleared");
        } else {
            info!("Payment declined by service");
        }

        Ok(status)
    }
}

/// `MM / YY` with a calendar month.
fn valid_expiry(value: &str) -> bool {
    split_expiry(value)
        .and_then(|(month, _)| month.parse::<u8>().ok())
        .is_some_and(|month| (1..=12).contains(&month))
}
