//! Cart error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Index does not refer to an item in the current cart.
    #[error("cart index {index} out of range (cart has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Quantity would not fit in a `u32`.
    #[error("quantity of {name} would overflow")]
    QuantityOverflow { name: String },

    /// Line or cart totals would not fit a `Decimal`.
    #[error("cart total would overflow")]
    AmountOverflow,

    /// A stored cart value exists but cannot be decoded.
    #[error("stored cart under key {key:?} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// Cart could not be encoded for storage.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// Storage slot operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
