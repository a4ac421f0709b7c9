//! Integration tests for Riddim.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p riddim-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store against an on-disk storage file
//! - `shopping_flow` - Catalog, cart and checkout end to end
//!
//! Shared fixtures live here.

use std::path::PathBuf;

use riddim_storefront::{CartStore, CorruptCartPolicy, JsonFileStore};
use tempfile::TempDir;

/// A storage file in a fresh temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct StorageFixture {
    dir: TempDir,
}

impl StorageFixture {
    /// Create a fixture with an empty directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path of the storage file inside the fixture directory.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("local-storage.json")
    }

    /// Open the cart in this fixture's storage file, as a fresh session would.
    ///
    /// # Panics
    ///
    /// Panics if the storage file or cart cannot be opened.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn open_cart(&self, policy: CorruptCartPolicy) -> CartStore<JsonFileStore> {
        let storage = JsonFileStore::open(self.path()).expect("open storage file");
        CartStore::open(storage, "cart", policy).expect("open cart")
    }
}

impl Default for StorageFixture {
    fn default() -> Self {
        Self::new()
    }
}
