//! The list pipeline: category filter, free-text search, and sorting.
//!
//! Every list screen (catalog pages, the admin products grid, orders,
//! inquiries) narrows and orders its records the same way, in a fixed
//! order: **category filter, then text search, then sort**. Displayed
//! counts are taken after the two filter stages, so the order matters and
//! is fixed here rather than left to callers.
//!
//! Sorting is stable: records with equal keys keep their relative input
//! order regardless of direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{Category, CategoryFilter};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Query-string value (`asc` / `desc`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// A sort field plus direction. Not persisted; every screen starts from its
/// own default on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortConfig<F> {
    /// Create a sort config.
    #[must_use]
    pub const fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// The config produced by clicking a sort control.
    ///
    /// Clicking the already-active field flips the direction; clicking a new
    /// field selects it with `default_direction` (ascending for product
    /// screens, descending for order screens).
    #[must_use]
    pub fn toggled(self, field: F, default_direction: SortDirection) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: default_direction,
            }
        }
    }
}

/// A record that can flow through the list pipeline.
pub trait Listable {
    /// The set of fields this record can be sorted by.
    type SortField: Copy;

    /// Category used by the category filter. Records without one (orders,
    /// inquiries) always pass the filter.
    fn category(&self) -> Option<Category> {
        None
    }

    /// The text fields scanned by free-text search.
    fn search_terms(&self) -> Vec<String>;

    /// Compare two records on the given field, ascending.
    fn compare(&self, other: &Self, field: Self::SortField) -> Ordering;
}

/// Retain only records accepted by the category filter.
#[must_use]
pub fn filter_by_category<T: Listable>(items: Vec<T>, filter: CategoryFilter) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| filter.accepts(item.category()))
        .collect()
}

/// Retain only records with at least one search term containing `query`,
/// case-insensitively. An empty query matches everything.
#[must_use]
pub fn search<T: Listable>(items: Vec<T>, query: &str) -> Vec<T> {
    if query.is_empty() {
        return items;
    }
    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| {
            item.search_terms()
                .iter()
                .any(|term| term.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable-sort records by the configured field and direction.
pub fn sort<T: Listable>(items: &mut [T], config: SortConfig<T::SortField>) {
    items.sort_by(|a, b| {
        let ordering = a.compare(b, config.field);
        match config.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Run the full pipeline: category filter, then search, then sort.
#[must_use]
pub fn apply<T: Listable>(
    items: Vec<T>,
    filter: CategoryFilter,
    query: &str,
    config: SortConfig<T::SortField>,
) -> Vec<T> {
    let mut narrowed = search(filter_by_category(items, filter), query);
    sort(&mut narrowed, config);
    narrowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        rank: i64,
        category: Option<Category>,
    }

    fn row(name: &str, rank: i64, category: Option<Category>) -> Row {
        Row {
            name: name.to_string(),
            rank,
            category,
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum RowField {
        Name,
        Rank,
    }

    impl Listable for Row {
        type SortField = RowField;

        fn category(&self) -> Option<Category> {
            self.category
        }

        fn search_terms(&self) -> Vec<String> {
            vec![self.name.clone()]
        }

        fn compare(&self, other: &Self, field: RowField) -> Ordering {
            match field {
                RowField::Name => self.name.cmp(&other.name),
                RowField::Rank => self.rank.cmp(&other.rank),
            }
        }
    }

    #[test]
    fn test_category_filter_is_idempotent() {
        let items = vec![
            row("a", 1, Some(Category::Bags)),
            row("b", 2, Some(Category::Tshirts)),
            row("c", 3, Some(Category::Bags)),
        ];
        let once = filter_by_category(items, CategoryFilter::Only(Category::Bags));
        let twice = filter_by_category(once.clone(), CategoryFilter::Only(Category::Bags));
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = vec![row("Red Hoodie", 1, None), row("blue tee", 2, None)];
        let upper = search(items.clone(), "RED");
        let lower = search(items, "red");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper.first().map(|r| r.name.as_str()), Some("Red Hoodie"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let items = vec![row("a", 1, None), row("b", 2, None)];
        assert_eq!(search(items.clone(), "").len(), items.len());
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        // Equal rank: relative input order must survive, both directions.
        let items = vec![row("first", 5, None), row("second", 5, None), row("third", 1, None)];

        let mut asc = items.clone();
        sort(&mut asc, SortConfig::new(RowField::Rank, SortDirection::Asc));
        let asc_names: Vec<&str> = asc.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(asc_names, vec!["third", "first", "second"]);

        let mut desc = items;
        sort(&mut desc, SortConfig::new(RowField::Rank, SortDirection::Desc));
        let desc_names: Vec<&str> = desc.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(desc_names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_desc_is_reverse_of_asc_without_ties() {
        let items = vec![row("b", 2, None), row("c", 3, None), row("a", 1, None)];

        let mut asc = items.clone();
        sort(&mut asc, SortConfig::new(RowField::Rank, SortDirection::Asc));
        let mut desc = items;
        sort(&mut desc, SortConfig::new(RowField::Rank, SortDirection::Desc));

        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_toggled_flips_active_field() {
        let config = SortConfig::new(RowField::Name, SortDirection::Asc);
        let flipped = config.toggled(RowField::Name, SortDirection::Asc);
        assert_eq!(flipped.direction, SortDirection::Desc);
        assert_eq!(
            flipped.toggled(RowField::Name, SortDirection::Asc).direction,
            SortDirection::Asc
        );
    }

    #[test]
    fn test_toggled_new_field_takes_default_direction() {
        let config = SortConfig::new(RowField::Name, SortDirection::Desc);
        let products_style = config.toggled(RowField::Rank, SortDirection::Asc);
        assert_eq!(products_style.field, RowField::Rank);
        assert_eq!(products_style.direction, SortDirection::Asc);

        let orders_style = config.toggled(RowField::Rank, SortDirection::Desc);
        assert_eq!(orders_style.direction, SortDirection::Desc);
    }

    #[test]
    fn test_apply_runs_filter_then_search_then_sort() {
        let items = vec![
            row("zip tote", 3, Some(Category::Bags)),
            row("art tee", 2, Some(Category::Tshirts)),
            row("art tote", 1, Some(Category::Bags)),
        ];
        let out = apply(
            items,
            CategoryFilter::Only(Category::Bags),
            "tote",
            SortConfig::new(RowField::Rank, SortDirection::Asc),
        );
        let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["art tote", "zip tote"]);
    }
}
