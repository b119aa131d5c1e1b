//! Catalog items and the inspiration grouping engine.
//!
//! Catalog browsing is organized around "inspirations": free-text theme
//! labels shared by several designs within one category ("space", "ocean").
//! A category page shows one representative card per theme; the theme page
//! then lists every item carrying that label.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pipeline::Listable;
use crate::types::{Category, ProductId, price};

/// A sellable design in one of the three product lines.
///
/// The remote API's sub-resources do not self-describe their category, so
/// `category` is stamped by the API client when a collection is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ProductId,
    pub category: Category,
    pub name: String,
    #[serde(default, with = "price::lenient")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub inspiration: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Sort fields for product screens. Defaults to name, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortField {
    #[default]
    Name,
    Price,
    CreatedAt,
}

impl ProductSortField {
    /// Query-string value for this field.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::CreatedAt => "created_at",
        }
    }
}

impl std::str::FromStr for ProductSortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "created_at" => Ok(Self::CreatedAt),
            _ => Err(()),
        }
    }
}

impl Listable for CatalogItem {
    type SortField = ProductSortField;

    fn category(&self) -> Option<Category> {
        Some(self.category)
    }

    fn search_terms(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.inspiration.clone(),
            self.category.slug().to_string(),
        ]
    }

    fn compare(&self, other: &Self, field: ProductSortField) -> Ordering {
        match field {
            ProductSortField::Name => self.name.cmp(&other.name),
            ProductSortField::Price => self.price.cmp(&other.price),
            // Missing timestamps sort before any present one.
            ProductSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

/// Reduce a category's items to one representative per distinct
/// `inspiration`, preserving first-occurrence order.
///
/// The first item carrying a theme wins; later items with an already-seen
/// theme are dropped, their data is not merged. Items with an empty
/// `inspiration` form a single group keyed by the empty string.
#[must_use]
pub fn group_by_inspiration(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.inspiration.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, inspiration: &str) -> CatalogItem {
        CatalogItem {
            id: ProductId::new(id),
            category: Category::Bags,
            name: format!("item {id}"),
            price: Decimal::new(10, 0),
            image: String::new(),
            inspiration: inspiration.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_grouping_first_occurrence_wins() {
        let grouped = group_by_inspiration(vec![
            item(1, "space"),
            item(2, "ocean"),
            item(3, "space"),
        ]);
        let ids: Vec<i32> = grouped.iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_grouping_counts_distinct_inspirations() {
        let items = vec![
            item(1, "space"),
            item(2, "ocean"),
            item(3, "space"),
            item(4, "forest"),
            item(5, "ocean"),
        ];
        let distinct: HashSet<&str> = items.iter().map(|i| i.inspiration.as_str()).collect();
        let grouped = group_by_inspiration(items.clone());
        assert_eq!(grouped.len(), distinct.len());
    }

    #[test]
    fn test_grouping_preserves_first_occurrence_order() {
        let grouped = group_by_inspiration(vec![
            item(9, "zebra"),
            item(2, "apple"),
            item(7, "zebra"),
            item(4, "mango"),
        ]);
        let themes: Vec<&str> = grouped.iter().map(|i| i.inspiration.as_str()).collect();
        assert_eq!(themes, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_grouping_empty_input() {
        assert!(group_by_inspiration(Vec::new()).is_empty());
    }

    #[test]
    fn test_grouping_empty_inspiration_is_one_group() {
        let grouped = group_by_inspiration(vec![item(1, ""), item(2, ""), item(3, "space")]);
        let ids: Vec<i32> = grouped.iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_price_sort_across_categories() {
        use crate::pipeline::{self, SortConfig, SortDirection};
        use crate::types::CategoryFilter;

        let mut tee = item(1, "a");
        tee.name = "B Tee".to_string();
        tee.category = Category::Tshirts;
        tee.price = Decimal::new(10, 0);
        let mut bag = item(2, "b");
        bag.name = "A Bag".to_string();
        bag.category = Category::Bags;
        bag.price = Decimal::new(20, 0);
        let mut hoodie = item(3, "c");
        hoodie.name = "C Hoodie".to_string();
        hoodie.category = Category::Hoodies;
        hoodie.price = Decimal::new(5, 0);

        let sorted = pipeline::apply(
            vec![tee, bag, hoodie],
            CategoryFilter::All,
            "",
            SortConfig::new(ProductSortField::Price, SortDirection::Asc),
        );
        let names: Vec<&str> = sorted.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["C Hoodie", "B Tee", "A Bag"]);
    }

    #[test]
    fn test_missing_created_at_sorts_first() {
        let mut dated = item(1, "a");
        dated.created_at = Some(Utc::now());
        let undated = item(2, "b");
        assert_eq!(
            undated.compare(&dated, ProductSortField::CreatedAt),
            Ordering::Less
        );
    }
}
