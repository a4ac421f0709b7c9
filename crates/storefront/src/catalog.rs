//! Product catalog.
//!
//! The store sells a fixed list of instruments and services priced in
//! Jamaican dollars. The list is built once and shared.

use std::str::FromStr;
use std::sync::LazyLock;

use riddim_core::{Category, CategoryError, Price, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;

/// A product on sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: &'static str,
    pub price: Decimal,
    pub category: Category,
    pub description: &'static str,
}

impl Product {
    /// Price with currency, for display.
    #[must_use]
    pub const fn display_price(&self) -> Price {
        Price::jmd(self.price)
    }
}

/// Category filter for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        product(
            1,
            "Acoustic Guitar",
            85_000,
            Category::Guitars,
            "Professional acoustic guitar with rich sound",
        ),
        product(
            2,
            "Electric Guitar",
            125_000,
            Category::Guitars,
            "Premium electric guitar with amplifier",
        ),
        product(
            3,
            "Digital Piano",
            185_000,
            Category::Pianos,
            "88-key digital piano with weighted keys",
        ),
        product(
            4,
            "Drum Set",
            245_000,
            Category::Drums,
            "Complete 5-piece drum set with cymbals",
        ),
        product(
            5,
            "Violin",
            65_000,
            Category::Strings,
            "Classical violin with bow and case",
        ),
        product(
            6,
            "Instrument Repair Service",
            15_000,
            Category::Repair,
            "Professional repair and maintenance service",
        ),
        product(
            7,
            "Bass Guitar",
            95_000,
            Category::Guitars,
            "4-string bass guitar with powerful sound",
        ),
        product(
            8,
            "Saxophone",
            135_000,
            Category::Wind,
            "Alto saxophone with case and cleaning kit",
        ),
    ]
});

fn product(
    id: u32,
    name: &'static str,
    price: i64,
    category: Category,
    description: &'static str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name,
        price: Decimal::from(price),
        category,
        description,
    }
}

/// Every product, in catalog order.
#[must_use]
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

/// Products matching `filter`, in catalog order.
pub fn filter(filter: CategoryFilter) -> impl Iterator<Item = &'static Product> {
    products().iter().filter(move |p| filter.matches(p))
}

/// Look up a product by id.
#[must_use]
pub fn find(id: ProductId) -> Option<&'static Product> {
    products().iter().find(|p| p.id == id)
}

/// Look up a product by name, ignoring ASCII case and surrounding whitespace.
#[must_use]
pub fn find_by_name(name: &str) -> Option<&'static Product> {
    let name = name.trim();
    products().iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_catalog_has_eight_products_with_unique_names() {
        let all = products();
        assert_eq!(all.len(), 8);
        for (i, p) in all.iter().enumerate() {
            assert!(all.iter().skip(i + 1).all(|q| q.name != p.name));
        }
    }

    #[test]
    fn test_filter_all_returns_everything() {
        assert_eq!(filter(CategoryFilter::All).count(), products().len());
    }

    #[test]
    fn test_filter_by_category() {
        let guitars: Vec<&str> = filter(CategoryFilter::Only(Category::Guitars))
            .map(|p| p.name)
            .collect();
        assert_eq!(guitars, ["Acoustic Guitar", "Electric Guitar", "Bass Guitar"]);

        assert_eq!(filter(CategoryFilter::Only(Category::Wind)).count(), 1);
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "pianos".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Pianos)
        );
        assert!("tubas".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let violin = find_by_name("  violin ").unwrap();
        assert_eq!(violin.price, dec!(65000));
        assert_eq!(violin.display_price().display(), "J$65,000.00");
        assert!(find_by_name("Theremin").is_none());
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(find(ProductId::new(8)).unwrap().name, "Saxophone");
        assert!(find(ProductId::new(99)).is_none());
    }
}
