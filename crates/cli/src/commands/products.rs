//! Catalog listing.

use riddim_storefront::catalog::{self, CategoryFilter};

use crate::render;

/// Print the products matching `category`.
pub fn list(category: CategoryFilter) {
    let products: Vec<_> = catalog::filter(category).collect();
    print!("{}", render::products(&products));
}
