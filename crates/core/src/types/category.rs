//! Product categories and the category filter.
//!
//! The shop carries exactly three product lines, each backed by its own
//! REST sub-resource on the remote API (`/bags`, `/tshirts`, `/hoodies`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three fixed product lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bags,
    Tshirts,
    Hoodies,
}

impl Category {
    /// All categories, in the order the admin panel merges them.
    pub const ALL: [Self; 3] = [Self::Bags, Self::Tshirts, Self::Hoodies];

    /// The REST path segment for this category's sub-resource.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Bags => "bags",
            Self::Tshirts => "tshirts",
            Self::Hoodies => "hoodies",
        }
    }

    /// Human-readable singular label ("Bag", "T-Shirt", "Hoodie").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bags => "Bag",
            Self::Tshirts => "T-Shirt",
            Self::Hoodies => "Hoodie",
        }
    }

    /// Human-readable plural label for page headings.
    #[must_use]
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Bags => "Bags",
            Self::Tshirts => "T-Shirts",
            Self::Hoodies => "Hoodies",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error parsing a category slug.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bags" => Ok(Self::Bags),
            "tshirts" => Ok(Self::Tshirts),
            "hoodies" => Ok(Self::Hoodies),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// Category filter for list screens: either everything or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a record with the given category passes this filter.
    ///
    /// Records without a category (e.g. orders) always pass.
    #[must_use]
    pub fn accepts(self, category: Option<Category>) -> bool {
        match (self, category) {
            (Self::All, _) | (Self::Only(_), None) => true,
            (Self::Only(wanted), Some(cat)) => wanted == cat,
        }
    }

    /// The query-string value for this filter (`all` or a category slug).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(cat) => cat.slug(),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse::<Category>().map(Self::Only)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(cat.slug().parse::<Category>(), Ok(cat));
        }
        assert!("socks".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_slug() {
        let cat: Category = serde_json::from_str("\"tshirts\"").expect("deserialize");
        assert_eq!(cat, Category::Tshirts);
        assert_eq!(
            serde_json::to_string(&Category::Hoodies).expect("serialize"),
            "\"hoodies\""
        );
    }

    #[test]
    fn test_filter_accepts() {
        assert!(CategoryFilter::All.accepts(Some(Category::Bags)));
        assert!(CategoryFilter::All.accepts(None));
        assert!(CategoryFilter::Only(Category::Bags).accepts(Some(Category::Bags)));
        assert!(!CategoryFilter::Only(Category::Bags).accepts(Some(Category::Hoodies)));
        // Records without a category are never filtered out.
        assert!(CategoryFilter::Only(Category::Bags).accepts(None));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "bags".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Bags))
        );
        assert!("everything".parse::<CategoryFilter>().is_err());
    }
}
