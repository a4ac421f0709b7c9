//! Riddim Core - Shared types library.
//!
//! This crate provides common types used across all Riddim components:
//! - `storefront` - Cart store, catalog, checkout and account form validation
//! - `cli` - Command-line front end that renders the store and routes actions
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
