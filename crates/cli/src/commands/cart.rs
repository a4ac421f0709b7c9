//! Cart commands.

use riddim_storefront::catalog;
use riddim_storefront::{AppError, CartStore, KeyValueStore};
use rust_decimal::Decimal;

use super::line_index;
use crate::render;

/// Print the cart view.
pub fn show<S>(cart: &CartStore<S>) {
    print!("{}", render::cart(cart.items(), &cart.compute_totals()));
}

/// Print the totals block only.
pub fn totals<S>(cart: &CartStore<S>) {
    print!("{}", render::totals(&cart.compute_totals()));
}

/// Add one unit of `product`. Without `price` the product must be in the
/// catalog, and its catalog name and price are used.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product without a price, or a
/// cart error if the cart cannot be saved.
pub fn add<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    product: &str,
    price: Option<Decimal>,
) -> Result<(), AppError> {
    match price {
        Some(price) => cart.add_item(product.trim(), price)?,
        None => {
            let found = catalog::find_by_name(product)
                .ok_or_else(|| AppError::NotFound(format!("product {product:?}")))?;
            cart.add_item(found.name, found.price)?;
        }
    }
    println!("Items in cart: {}", cart.item_count());
    Ok(())
}

/// Remove line `line` (1-based).
///
/// # Errors
///
/// Returns an error for a bad line number or if the cart cannot be saved.
pub fn remove<S: KeyValueStore>(cart: &mut CartStore<S>, line: usize) -> Result<(), AppError> {
    cart.remove_item(line_index(line)?)?;
    show(cart);
    Ok(())
}

/// Change the quantity on line `line` (1-based) by `delta`.
///
/// # Errors
///
/// Returns an error for a bad line number or if the cart cannot be saved.
pub fn change<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    line: usize,
    delta: i64,
) -> Result<(), AppError> {
    cart.update_quantity(line_index(line)?, delta)?;
    show(cart);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear<S: KeyValueStore>(cart: &mut CartStore<S>) -> Result<(), AppError> {
    cart.clear()?;
    show(cart);
    Ok(())
}
