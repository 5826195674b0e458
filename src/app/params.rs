//! UI parameter types for the derived view.
//!
//! The presentation layer owns three independent inputs: free-text search, a
//! category selector and a sort order. Each arrives as a primitive string; this
//! module turns those strings into typed values without ever rejecting input.
//!
//! # Example
//!
//! ```rust
//! use catalog_view::app::{CategoryFilter, SortKey};
//!
//! assert_eq!(SortKey::from_input("price-desc"), SortKey::PriceDesc);
//! assert_eq!(SortKey::from_input("newest"), SortKey::Unsorted);
//! assert_eq!(CategoryFilter::from_input("all"), CategoryFilter::All);
//! ```

use crate::domain::CatalogError;
use std::fmt;
use std::str::FromStr;

/// Category selector value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Sort order applied as the last pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Locale-aware title comparison, A to Z.
    #[default]
    TitleAsc,
    /// Locale-aware title comparison, Z to A.
    TitleDesc,
    /// Lowest price first.
    PriceAsc,
    /// Highest price first.
    PriceDesc,
    /// An unrecognized key was supplied; the sort stage passes items through.
    Unsorted,
}

impl SortKey {
    /// Every recognized key, in selector order.
    pub const ALL: [Self; 4] = [Self::TitleAsc, Self::TitleDesc, Self::PriceAsc, Self::PriceDesc];

    /// Parses a selector value, falling back to [`SortKey::Unsorted`].
    #[must_use]
    pub fn from_input(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(sort_key = %value, "unrecognized sort key, leaving order unchanged");
            Self::Unsorted
        })
    }

    /// Selector value for this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Unsorted => "unsorted",
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CatalogError::Config(format!("unknown sort key: {s}")))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// The [`ALL_CATEGORIES`] sentinel.
    #[default]
    All,
    /// Keep only items whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Parses a selector value; [`ALL_CATEGORIES`] maps to [`CategoryFilter::All`].
    #[must_use]
    pub fn from_input(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Whether `category` passes this filter.
    #[must_use]
    pub fn accepts(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// The three UI parameters taken together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    /// Empty means "no search filter". Not trimmed.
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl ViewParams {
    /// Builds parameters from raw selector strings.
    #[must_use]
    pub fn from_inputs(search: &str, category: &str, sort: &str) -> Self {
        Self {
            search: search.to_string(),
            category: CategoryFilter::from_input(category),
            sort: SortKey::from_input(sort),
        }
    }
}
