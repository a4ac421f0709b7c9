//! Product categories.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a category name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// Catalog category.
///
/// Serialized in lowercase, matching the category filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Guitars,
    Pianos,
    Drums,
    Strings,
    Repair,
    Wind,
}

impl Category {
    /// Every category, in catalog display order.
    pub const ALL: [Self; 6] = [
        Self::Guitars,
        Self::Pianos,
        Self::Drums,
        Self::Strings,
        Self::Repair,
        Self::Wind,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guitars => "guitars",
            Self::Pianos => "pianos",
            Self::Drums => "drums",
            Self::Strings => "strings",
            Self::Repair => "repair",
            Self::Wind => "wind",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}
