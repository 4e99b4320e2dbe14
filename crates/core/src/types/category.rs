//! Product categories.
//!
//! The shop carries a fixed set of categories. Modeling them as a closed
//! enum (rather than the free-form strings the data service stores) gives
//! compile-time exhaustiveness when filtering.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sofa,
    Furniture,
    #[serde(rename = "Furniture Cushion")]
    FurnitureCushion,
    #[serde(rename = "Cot headboard cushion")]
    CotHeadboardCushion,
    #[serde(rename = "Home appliances")]
    HomeAppliances,
    #[serde(rename = "Sofa Repair and service")]
    SofaRepairAndService,
    Electronics,
    Kitchenware,
    #[serde(rename = "Tv stand")]
    TvStand,
    Cupboard,
    Utensils,
    Curtains,
}

impl Category {
    /// All categories, in the order the shop presents them.
    pub const ALL: [Self; 12] = [
        Self::Sofa,
        Self::Furniture,
        Self::FurnitureCushion,
        Self::CotHeadboardCushion,
        Self::HomeAppliances,
        Self::SofaRepairAndService,
        Self::Electronics,
        Self::Kitchenware,
        Self::TvStand,
        Self::Cupboard,
        Self::Utensils,
        Self::Curtains,
    ];

    /// The string stored in the data service's `category` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sofa => "Sofa",
            Self::Furniture => "Furniture",
            Self::FurnitureCushion => "Furniture Cushion",
            Self::CotHeadboardCushion => "Cot headboard cushion",
            Self::HomeAppliances => "Home appliances",
            Self::SofaRepairAndService => "Sofa Repair and service",
            Self::Electronics => "Electronics",
            Self::Kitchenware => "Kitchenware",
            Self::TvStand => "Tv stand",
            Self::Cupboard => "Cupboard",
            Self::Utensils => "Utensils",
            Self::Curtains => "Curtains",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`Category`] or [`CategoryFilter`] from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError(s.to_owned()))
    }
}

/// A catalog filter: either everything, or a single category.
///
/// Models the "all" sentinel the category bar uses without widening
/// [`Category`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// No category filter applied.
    #[default]
    All,
    /// Only products in this category.
    Only(Category),
}

impl CategoryFilter {
    /// The category to filter on, if any.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(*category),
        }
    }

    /// Whether a category passes this filter.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Category>().map(Self::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_the_stored_column_strings() {
        let json = serde_json::to_string(&Category::SofaRepairAndService).unwrap();
        assert_eq!(json, "\"Sofa Repair and service\"");
        let back: Category = serde_json::from_str("\"Furniture Cushion\"").unwrap();
        assert_eq!(back, Category::FurnitureCushion);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("tv stand".parse::<Category>().unwrap(), Category::TvStand);
        assert!("Bedframe".parse::<Category>().is_err());
    }

    #[test]
    fn filter_parses_the_all_sentinel() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Sofa".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Sofa)
        );
    }

    #[test]
    fn filter_matching() {
        assert!(CategoryFilter::All.matches(Category::Curtains));
        let only = CategoryFilter::Only(Category::Sofa);
        assert!(only.matches(Category::Sofa));
        assert!(!only.matches(Category::Cupboard));
    }

    #[test]
    fn all_round_trips_through_as_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }
}
