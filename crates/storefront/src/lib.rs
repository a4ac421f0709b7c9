//! Riddim Storefront library.
//!
//! The storefront owns everything behind the presentation layer:
//!
//! - [`cart`] - The cart store: line items, write-through persistence, totals
//! - [`storage`] - Durable key-value slots the cart is persisted to
//! - [`catalog`] - The fixed product list and category filtering
//! - [`checkout`] - Payment check and order confirmation
//! - [`accounts`] - Login and registration form validation
//! - [`config`] - Environment-driven configuration
//!
//! Everything here is synchronous. Each operation, persistence included,
//! completes before the next one can start.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod storage;

pub use cart::{CartError, CartEvent, CartStore, CartTotals, CorruptCartPolicy, LineItem};
pub use error::AppError;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
