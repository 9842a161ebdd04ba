//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are snapshots: a cart line captures the price at add time and
//! never re-reads the catalog. All arithmetic goes through [`Decimal`] so
//! totals stay exact (no binary floating point).

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in the smallest currency unit
    /// (e.g., cents for USD).
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency_code,
        }
    }

    /// The zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Multiply this unit price by a quantity, producing a line total.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Add another price of the same currency.
    ///
    /// Mixing currencies is a programming error; the sample catalog is
    /// single-currency. Debug builds assert, release builds keep the
    /// left-hand currency.
    #[must_use]
    pub fn plus(&self, other: Self) -> Self {
        debug_assert_eq!(self.currency_code, other.currency_code);
        Self {
            amount: self.amount + other.amount,
            currency_code: self.currency_code,
        }
    }

    /// Whether this is a zero amount.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Price {
    /// Format for display (e.g., "$19.99").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            other => Err(format!("unknown currency code: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(999, CurrencyCode::USD);
        assert_eq!(price.amount, Decimal::new(999, 2));
    }

    #[test]
    fn test_times() {
        let price = Price::from_cents(999, CurrencyCode::USD);
        assert_eq!(price.times(3).amount, Decimal::new(2997, 2));
    }

    #[test]
    fn test_plus() {
        let a = Price::from_cents(999, CurrencyCode::USD);
        let b = Price::from_cents(1299, CurrencyCode::USD);
        assert_eq!(a.plus(b).amount, Decimal::new(2298, 2));
    }

    #[test]
    fn test_zero() {
        let zero = Price::zero(CurrencyCode::USD);
        assert!(zero.is_zero());
        assert_eq!(zero.to_string(), "$0.00");
    }

    #[test]
    fn test_display() {
        let price = Price::from_cents(550, CurrencyCode::USD);
        assert_eq!(price.to_string(), "$5.50");

        let price = Price::from_cents(350, CurrencyCode::GBP);
        assert_eq!(price.to_string(), "\u{a3}3.50");
    }

    #[test]
    fn test_currency_code_round_trip() {
        let code: CurrencyCode = "usd".parse().unwrap();
        assert_eq!(code, CurrencyCode::USD);
        assert_eq!(code.code(), "USD");
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
