//! Type-safe price representation.
//!
//! The catalog service reports prices as integers in the currency's minor
//! unit (öre, cents). [`Price`] keeps that integer as the source of truth and
//! only converts to a [`Decimal`] for display.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors produced by price arithmetic and currency parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The result does not fit in an `i64` minor-unit amount.
    #[error("price arithmetic overflowed")]
    Overflow,
    /// Two prices in different currencies were combined.
    #[error("currency mismatch: {0} vs {1}")]
    CurrencyMismatch(CurrencyCode, CurrencyCode),
    /// Unknown ISO 4217 code.
    #[error("unsupported currency code: {0}")]
    UnknownCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's minor unit (e.g. öre, not kronor).
    pub minor_units: i64,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a price from a minor-unit amount.
    #[must_use]
    pub const fn from_minor(minor_units: i64, currency_code: CurrencyCode) -> Self {
        Self {
            minor_units,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::from_minor(0, currency_code)
    }

    /// Amount in the currency's standard unit (e.g. `199.00`).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.minor_units, self.currency_code.minor_digits())
    }

    /// Multiply by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the result does not fit.
    pub fn checked_mul(self, quantity: u32) -> Result<Self, PriceError> {
        self.minor_units
            .checked_mul(i64::from(quantity))
            .map(|minor_units| Self::from_minor(minor_units, self.currency_code))
            .ok_or(PriceError::Overflow)
    }

    /// Add two prices of the same currency.
    ///
    /// # Errors
    ///
    /// Returns an error on currency mismatch or overflow.
    pub fn checked_add(self, other: Self) -> Result<Self, PriceError> {
        if self.currency_code != other.currency_code {
            return Err(PriceError::CurrencyMismatch(
                self.currency_code,
                other.currency_code,
            ));
        }
        self.minor_units
            .checked_add(other.minor_units)
            .map(|minor_units| Self::from_minor(minor_units, self.currency_code))
            .ok_or(PriceError::Overflow)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount(), self.currency_code)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    SEK,
    NOK,
    DKK,
    EUR,
    USD,
    GBP,
}

impl CurrencyCode {
    /// The ISO 4217 alphabetic code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::SEK => "SEK",
            Self::NOK => "NOK",
            Self::DKK => "DKK",
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
        }
    }

    /// Number of decimal digits in the minor unit.
    #[must_use]
    pub const fn minor_digits(self) -> u32 {
        2
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SEK" => Ok(Self::SEK),
            "NOK" => Ok(Self::NOK),
            "DKK" => Ok(Self::DKK),
            "EUR" => Ok(Self::EUR),
            "USD" => Ok(Self::USD),
            "GBP" => Ok(Self::GBP),
            _ => Err(PriceError::UnknownCurrency(s.to_owned())),
        }
    }
}
