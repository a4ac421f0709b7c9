//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are whole-unit `Decimal`s (dollars, not cents). Display formatting
//! follows the storefront convention: currency prefix, thousands separators
//! and exactly two fractional digits, e.g. `J$74,750.00`.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
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

    /// Create a price in Jamaican dollars.
    #[must_use]
    pub const fn jmd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::JMD)
    }

    /// Format for display (e.g., "J$65,000.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{}",
            self.currency_code.symbol(),
            format_amount(self.amount)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    JMD,
    USD,
}

impl CurrencyCode {
    /// Display prefix for amounts in this currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::JMD => "J$",
            Self::USD => "$",
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::JMD => "JMD",
            Self::USD => "USD",
        }
    }
}

/// Format an amount with thousands separators and two decimal places.
///
/// Rounds half away from zero before formatting.
///
/// ```
/// use riddim_core::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(7_475_000, 2)), "74,750.00");
/// assert_eq!(format_amount(Decimal::new(5, 1)), "0.50");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

/// Serde adapter that writes amounts as JSON numbers.
///
/// The number carries the exact decimal digits, with trailing fractional
/// zeros dropped, so whole amounts come out as integers (`65000`). Reading
/// accepts integers, decimals and numeric strings.
pub mod amount_as_number {
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer};

    /// Serialize a `Decimal` as a JSON number without going through `f64`.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the number cannot be written.
    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&amount.normalize(), serializer)
    }

    /// Deserialize a `Decimal` from a JSON number or numeric string.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not numeric or does not fit a
    /// `Decimal`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::arbitrary_precision::deserialize(deserializer)
    }
}
