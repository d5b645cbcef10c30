//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! storefront-cli checkout \
//!     --email ada@example.com --name "Ada Lovelace" --phone +46701234567 \
//!     --line1 "Drottninggatan 1" --postal-code "111 51" --city Stockholm \
//!     --card-name "ADA LOVELACE" --card-number 4111111111111111 \
//!     --card-expiry 1230 --card-cvc 737
//! ```
//!
//! Card number and expiry are accepted in any spacing; they go through the
//! same formatters as keyed input.

use clap::Args;
use storefront_checkout::AppState;
use storefront_checkout::checkout::{CheckoutError, CheckoutSession, DEFAULT_COUNTRY};
use storefront_checkout_core::PaymentStatus;

/// Shopper details for a checkout.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    email: String,

    /// Full name, used for both billing and shipping
    #[arg(long)]
    name: String,

    #[arg(long)]
    phone: String,

    /// Street address
    #[arg(long)]
    line1: String,

    #[arg(long)]
    postal_code: String,

    #[arg(long)]
    city: String,

    /// ISO 3166-1 alpha-2 country code
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,

    /// Cardholder name
    #[arg(long)]
    card_name: String,

    #[arg(long)]
    card_number: String,

    /// Expiry as MMYY or MM / YY
    #[arg(long)]
    card_expiry: String,

    #[arg(long)]
    card_cvc: String,

    #[arg(long)]
    promotion_code: Option<String>,
}

/// Fill a session from the arguments, the way a shopper would fill the form.
fn fill_session(args: CheckoutArgs) -> (CheckoutSession, Option<String>) {
    let mut session = CheckoutSession::new();

    session.input_email(&args.email);
    session.input_card_number(&args.card_number);
    session.input_card_expiry(&args.card_expiry);

    let form = session.form_mut();
    form.name = args.name;
    form.phone = args.phone;
    form.line1 = args.line1;
    form.postal_code = args.postal_code;
    form.city = args.city;
    form.country = args.country;
    form.cc_name = args.card_name;
    form.cc_csc = args.card_cvc;

    (session, args.promotion_code)
}

/// Validate the form, pay for the cart and print the outcome.
///
/// A declined payment is reported but is not a command failure; the cart is
/// kept so the shopper can retry.
///
/// # Errors
///
/// Returns an error if the form is invalid, the cart is empty, or the
/// payment service gives no usable answer.
#[allow(clippy::print_stdout)]
pub async fn run(state: &AppState, args: CheckoutArgs) -> storefront_checkout::Result<()> {
    let (mut session, promotion_code) = fill_session(args);
    let mut cart = state.cart_store();

    let outcome = session
        .submit(&mut cart, state.payments(), promotion_code.as_deref())
        .await;

    match outcome {
        Ok(PaymentStatus::Ok { data }) => {
            println!("Payment accepted");
            if !data.is_null() {
                println!("{}", serde_json::to_string_pretty(&data).unwrap_or_default());
            }
            Ok(())
        }
        Ok(PaymentStatus::Error { error }) => {
            println!("Payment declined");
            if !error.is_null() {
                println!("{error}");
            }
            Ok(())
        }
        Err(CheckoutError::InvalidInput(fields)) => {
            if let Some(message) = session.email_validation().error() {
                println!("{message}");
            }
            if let Some(message) = session.validation().error() {
                println!("{message} Check: {}", fields.join(", "));
            }
            Err(CheckoutError::InvalidInput(fields).into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: CheckoutArgs,
    }

    #[test]
    fn test_fill_session_formats_card_fields() {
        let cli = TestCli::parse_from([
            "test",
            "--email",
            "ada@example.com",
            "--name",
            "Ada Lovelace",
            "--phone",
            "+46701234567",
            "--line1",
            "Drottninggatan 1",
            "--postal-code",
            "111 51",
            "--city",
            "Stockholm",
            "--card-name",
            "ADA LOVELACE",
            "--card-number",
            "4111111111111111",
            "--card-expiry",
            "1230",
            "--card-cvc",
            "737",
        ]);

        let (mut session, promotion_code) = fill_session(cli.args);
        assert_eq!(promotion_code, None);
        assert_eq!(session.form().country, "SE");
        assert_eq!(session.form().cc_number, "4111 1111 1111 1111");
        assert_eq!(session.form().cc_exp, "12 / 30");
        assert!(session.validate().is_empty());
    }
}
