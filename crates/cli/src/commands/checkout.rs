//! Checkout command.

use riddim_storefront::checkout::confirm_order;
use riddim_storefront::{AppError, CartStore, KeyValueStore};
use rust_decimal::Decimal;

use crate::render;

/// Confirm the order against `payment` and print the receipt.
///
/// # Errors
///
/// Returns `AppError::Checkout` if the cart is empty, the payment is short,
/// or the cart cannot be cleared.
pub fn confirm<S: KeyValueStore>(cart: &mut CartStore<S>, payment: Decimal) -> Result<(), AppError> {
    let confirmation = confirm_order(cart, payment)?;
    print!("{}", render::receipt(&confirmation));
    Ok(())
}
