use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::LineItem;

/// Fixed sales tax rate (15%).
pub const TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Derived cart totals, each rounded to 2 decimal places.
///
/// Never persisted. [`super::CartStore`] only accepts item lists whose totals
/// can be computed, so reading them back cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals over `items`, or `None` if any intermediate amount
    /// overflows a `Decimal`.
    ///
    /// The subtotal is summed exactly; tax and total are derived from the
    /// unrounded subtotal and only the three results are rounded.
    #[must_use]
    pub fn from_items(items: &[LineItem]) -> Option<Self> {
        let subtotal = items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.line_total()?)
        })?;
        let tax = subtotal.checked_mul(TAX_RATE)?;
        let total = subtotal.checked_add(tax)?;

        Some(Self {
            subtotal: round_cents(subtotal),
            tax: round_cents(tax),
            total: round_cents(total),
        })
    }

    /// All-zero totals, as for an empty cart.
    #[must_use]
    pub const fn zero() -> Self {
        let zero = Decimal::from_parts(0, 0, 0, false, 2);
        Self {
            subtotal: zero,
            tax: zero,
            total: zero,
        }
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
