//! Checkout form handling.
//!
//! - [`CheckoutSession`] owns the form and its validity flags for one pass
//!   through checkout
//! - Formatters normalize card input as it is typed
//! - [`CheckoutSession::submit`] combines the stored cart with the form and
//!   hands the payload to the payment submitter

mod form;
mod format;
mod session;

pub use form::{
    CheckoutForm, DEFAULT_COUNTRY, INVALID_EMAIL_MESSAGE, INVALID_INPUT_MESSAGE, Validity,
};
pub use format::{EXPIRY_SEPARATOR, digits, format_card_expiry, format_card_number, split_expiry};
pub use session::{CheckoutError, CheckoutSession};
