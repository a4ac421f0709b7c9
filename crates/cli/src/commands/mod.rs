//! Command implementations.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod products;

use riddim_storefront::config::StorefrontConfig;
use riddim_storefront::{AppError, CartStore, JsonFileStore};
use tracing::debug;

/// Open the cart persisted in the configured storage file.
///
/// # Errors
///
/// Returns an error if the storage file is unreadable, or the stored cart is
/// corrupt and the configuration says to fail.
pub fn open_cart(config: &StorefrontConfig) -> Result<CartStore<JsonFileStore>, AppError> {
    let storage = JsonFileStore::open(&config.storage_path)?;
    let mut cart = CartStore::open(storage, config.cart_key.as_str(), config.corrupt_cart)?;
    cart.subscribe(|_| println!("Added to cart!"));
    debug!(
        path = %config.storage_path.display(),
        items = cart.len(),
        "Opened cart"
    );
    Ok(cart)
}

/// Convert a 1-based line number from the cart view to an index.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for line 0.
pub fn line_index(line: usize) -> Result<usize, AppError> {
    line.checked_sub(1)
        .ok_or_else(|| AppError::BadRequest("line numbers start at 1".to_owned()))
}
