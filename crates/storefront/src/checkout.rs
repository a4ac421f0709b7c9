//! Order confirmation.
//!
//! Checkout is simulated: there is no payment processor. The shopper enters
//! the amount they are paying, and the order is confirmed when it covers the
//! cart total. A confirmed order empties the cart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::cart::{CartError, CartStore, CartTotals, LineItem};
use crate::storage::KeyValueStore;

/// Errors that can occur when confirming an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("your cart is empty")]
    EmptyCart,

    /// Payment does not cover the total.
    #[error("insufficient payment of {payment}; total amount is {total}")]
    InsufficientPayment { total: Decimal, payment: Decimal },

    /// Clearing the cart after confirmation failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),
}

/// A confirmed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub confirmed_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub payment: Decimal,
    /// `payment - total`.
    pub change: Decimal,
}

/// Confirm the order in `cart` against `payment`.
///
/// On success the cart is cleared (and persisted) and the confirmation holds
/// the items and totals as they were at checkout.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart,
/// `CheckoutError::InsufficientPayment` when `payment` is below the total, or
/// `CheckoutError::Cart` if the change cannot be computed or the cart cannot
/// be cleared. The cart is unchanged in every error case.
pub fn confirm_order<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    payment: Decimal,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals = cart.compute_totals();
    if payment < totals.total {
        return Err(CheckoutError::InsufficientPayment {
            total: totals.total,
            payment,
        });
    }

    let change = payment
        .checked_sub(totals.total)
        .ok_or(CartError::AmountOverflow)?;

    let items = cart.items().to_vec();
    cart.clear()?;

    let confirmation = OrderConfirmation {
        order_id: Uuid::new_v4(),
        confirmed_at: Utc::now(),
        items,
        totals,
        payment,
        change,
    };

    info!(
        order_id = %confirmation.order_id,
        total = %totals.total,
        lines = confirmation.items.len(),
        "Order confirmed"
    );
    Ok(confirmation)
}
