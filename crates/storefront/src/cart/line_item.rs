use riddim_core::price::amount_as_number;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry in the cart.
///
/// Serialized as `{"name": "...", "price": 65000, "quantity": 1}`, the
/// layout the durable cart slot uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name. Unique within a cart.
    pub name: String,
    /// Unit price in whole currency units.
    #[serde(with = "amount_as_number")]
    pub price: Decimal,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// A fresh line with quantity 1.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// `price × quantity`, or `None` if the product does not fit a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_line_total() {
        let mut item = LineItem::new("Drum Set", dec!(245000));
        item.quantity = 3;
        assert_eq!(item.line_total(), Some(dec!(735000)));
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let mut item = LineItem::new("Gold Piano", Decimal::MAX);
        assert_eq!(item.line_total(), Some(Decimal::MAX));

        item.quantity = 2;
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn test_storage_layout() {
        let item = LineItem::new("Violin", dec!(65000));
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"name":"Violin","price":65000,"quantity":1}"#);
    }
}
