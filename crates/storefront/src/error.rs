//! Unified error type.
//!
//! Front ends that drive several storefront areas return `Result<T, AppError>`
//! and let `?` convert the area-specific errors.

use thiserror::Error;

use crate::accounts::FormErrors;
use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage slot could not be opened or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout was refused.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Submitted form has invalid fields.
    #[error("Form error: {0}")]
    Form(#[from] FormErrors),

    /// Requested product does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller passed an unusable argument.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the failure came from the caller's input rather than the
    /// system. Front ends show these to the user instead of logging them as
    /// errors.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Form(_)
                | Self::NotFound(_)
                | Self::BadRequest(_)
                | Self::Cart(
                    CartError::IndexOutOfRange { .. }
                        | CartError::QuantityOverflow { .. }
                        | CartError::AmountOverflow
                )
                | Self::Checkout(
                    CheckoutError::EmptyCart | CheckoutError::InsufficientPayment { .. }
                )
        )
    }
}
