//! Cache types for catalog reads.

use std::sync::Arc;

use loomline_core::CatalogItem;
use loomline_core::types::Category;

/// Cache key for catalog collections.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// A whole category listing.
    Category(Category),
    /// One inspiration theme within a category.
    Inspiration(Category, String),
}

/// Cached catalog collections are shared, not copied.
pub type CachedItems = Arc<Vec<CatalogItem>>;
