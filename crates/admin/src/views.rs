//! View helpers shared by the admin screens.

use chrono::{DateTime, Utc};

use loomline_core::{SortConfig, SortDirection};

/// Format a timestamp the way the tables display it, e.g. "Mar 5, 2025".
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

/// One sort control in a table header.
pub struct SortLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
    /// Arrow direction when active.
    pub ascending: bool,
}

impl SortLink {
    /// Build a sort control for `field`.
    ///
    /// The link encodes the state after a click: the active field flips its
    /// direction, any other field starts from `default_direction`. Extra
    /// query parameters (`extra`) are preserved, e.g. `&q=ocean`.
    pub fn build<F: Copy + PartialEq>(
        label: &'static str,
        base_path: &str,
        field: F,
        slug: fn(F) -> &'static str,
        current: SortConfig<F>,
        default_direction: SortDirection,
        extra: &str,
    ) -> Self {
        let next = current.toggled(field, default_direction);
        Self {
            label,
            href: format!(
                "{base_path}?sort={}&dir={}{extra}",
                slug(next.field),
                next.direction.slug()
            ),
            active: current.field == field,
            ascending: current.direction == SortDirection::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use loomline_core::ProductSortField;

    use super::*;

    #[test]
    fn test_format_date() {
        let ts: DateTime<Utc> = "2025-03-05T10:00:00Z".parse().expect("timestamp");
        assert_eq!(format_date(ts), "Mar 5, 2025");
    }

    #[test]
    fn test_sort_link_flips_active_field() {
        let current = SortConfig::new(ProductSortField::Name, SortDirection::Asc);
        let link = SortLink::build(
            "Name",
            "/products",
            ProductSortField::Name,
            ProductSortField::slug,
            current,
            SortDirection::Asc,
            "&q=ocean",
        );
        assert!(link.active);
        assert_eq!(link.href, "/products?sort=name&dir=desc&q=ocean");
    }

    #[test]
    fn test_sort_link_new_field_uses_default() {
        let current = SortConfig::new(ProductSortField::Name, SortDirection::Desc);
        let link = SortLink::build(
            "Price",
            "/products",
            ProductSortField::Price,
            ProductSortField::slug,
            current,
            SortDirection::Asc,
            "",
        );
        assert!(!link.active);
        assert_eq!(link.href, "/products?sort=price&dir=asc");
    }
}
