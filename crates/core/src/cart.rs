//! The shopper cart.
//!
//! The cart is client-local state, independent of the server until checkout:
//! an ordered sequence of lines, insertion order preserved, never
//! deduplicated (adding the same design twice yields two lines). The whole
//! sequence is serialized as one slot by the storefront's cart store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::types::{Category, ProductId, price};

/// One line in the cart, built from a catalog item plus context captured at
/// add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    #[serde(default, with = "price::lenient")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub inspiration: Option<String>,
    #[serde(rename = "type", default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Build a cart line from a catalog item.
    #[must_use]
    pub fn from_catalog(item: &CatalogItem, size: Option<String>, added_at: DateTime<Utc>) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            inspiration: (!item.inspiration.is_empty()).then(|| item.inspiration.clone()),
            category: Some(item.category),
            size,
            added_at,
        }
    }
}

/// The cart: an ordered, non-deduplicated sequence of lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The lines, in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a line. Always appends; the cart never merges duplicates.
    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Remove **all** lines whose id matches, not just the first.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i32, price: i64) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("line {id}"),
            price: Decimal::new(price, 0),
            image: String::new(),
            inspiration: None,
            category: Some(Category::Tshirts),
            size: None,
            added_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_total_is_additive() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Decimal::ZERO);

        cart.add(line(1, 25));
        cart.add(line(2, 45));
        assert_eq!(cart.total(), Decimal::new(70, 0));

        cart.remove(ProductId::new(1));
        assert_eq!(cart.total(), Decimal::new(45, 0));
    }

    #[test]
    fn test_add_never_merges() {
        let mut cart = Cart::new();
        cart.add(line(1, 10));
        cart.add(line(1, 10));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Decimal::new(20, 0));
    }

    #[test]
    fn test_remove_drops_every_match() {
        let mut cart = Cart::new();
        cart.add(line(1, 10));
        cart.add(line(2, 5));
        cart.add(line(1, 10));

        cart.remove(ProductId::new(1));
        assert!(cart.items().iter().all(|i| i.id != ProductId::new(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_preserves_order_of_the_rest() {
        let mut cart = Cart::new();
        cart.add(line(3, 1));
        cart.add(line(1, 1));
        cart.add(line(2, 1));
        cart.remove(ProductId::new(1));
        let ids: Vec<i32> = cart.items().iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add(line(1, 10));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_serde_roundtrip_keeps_wire_names() {
        let mut cart = Cart::new();
        cart.add(line(1, 10));
        let json = serde_json::to_string(&cart).expect("serialize");
        assert!(json.contains("\"type\""));
        assert!(json.contains("\"addedAt\""));

        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }

    #[test]
    fn test_from_catalog_captures_context() {
        let source = CatalogItem {
            id: ProductId::new(4),
            category: Category::Hoodies,
            name: "Nebula".to_string(),
            price: Decimal::new(1800, 0),
            image: "https://img.example/nebula.jpg".to_string(),
            inspiration: "space".to_string(),
            created_at: None,
        };
        let added_at = DateTime::<Utc>::UNIX_EPOCH;
        let item = CartItem::from_catalog(&source, Some("XL".to_string()), added_at);
        assert_eq!(item.id, source.id);
        assert_eq!(item.category, Some(Category::Hoodies));
        assert_eq!(item.inspiration.as_deref(), Some("space"));
        assert_eq!(item.size.as_deref(), Some("XL"));
        assert_eq!(item.added_at, added_at);
    }
}
