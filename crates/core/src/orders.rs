//! Orders as returned by the remote API, plus dashboard aggregates.
//!
//! The canonical order shape is the live-API one: flat `customer_name` /
//! `customer_email` fields and a numeric `order_id`.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pipeline::Listable;
use crate::types::{OrderId, ProductId, price};

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub product_type: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default, with = "price::lenient")]
    pub price: Decimal,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl OrderItem {
    /// Line total: price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Order total: sum of line totals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

/// Completion-status filter for the orders screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    /// Whether an order with the given completion flag passes.
    #[must_use]
    pub const fn accepts(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Completed => completed,
            Self::Pending => !completed,
        }
    }

    /// Query-string value for this filter.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            _ => Err(()),
        }
    }
}

/// Retain only orders accepted by the status filter.
#[must_use]
pub fn filter_by_status(orders: Vec<Order>, filter: StatusFilter) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|order| filter.accepts(order.completed))
        .collect()
}

/// Sort fields for the orders screen. Defaults to date, descending.
///
/// "Date" is keyed on the order id, which the API assigns monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSortField {
    #[default]
    Date,
    Total,
    Name,
}

impl OrderSortField {
    /// Query-string value for this field.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Total => "total",
            Self::Name => "name",
        }
    }
}

impl std::str::FromStr for OrderSortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "total" => Ok(Self::Total),
            "name" => Ok(Self::Name),
            _ => Err(()),
        }
    }
}

impl Listable for Order {
    type SortField = OrderSortField;

    fn search_terms(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.customer_name.clone(),
            self.customer_email.clone(),
        ]
    }

    fn compare(&self, other: &Self, field: OrderSortField) -> Ordering {
        match field {
            OrderSortField::Date => self.order_id.cmp(&other.order_id),
            OrderSortField::Total => self.total().cmp(&other.total()),
            OrderSortField::Name => self.customer_name.cmp(&other.customer_name),
        }
    }
}

/// Aggregate store metrics for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default, with = "price::lenient")]
    pub revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{self, SortConfig, SortDirection};
    use crate::types::CategoryFilter;

    fn order(id: i32, name: &str, completed: bool, prices: &[i64]) -> Order {
        Order {
            order_id: OrderId::new(id),
            customer_name: name.to_string(),
            customer_email: format!("{}@example.com", name.to_lowercase()),
            instagram_handle: None,
            completed,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            items: prices
                .iter()
                .map(|p| OrderItem {
                    product_type: None,
                    product_name: "x".to_string(),
                    product_id: None,
                    price: Decimal::new(*p, 0),
                    size: None,
                    quantity: 2,
                })
                .collect(),
        }
    }

    #[test]
    fn test_total_multiplies_quantity() {
        let o = order(1, "Ada", false, &[10, 5]);
        assert_eq!(o.total(), Decimal::new(30, 0));
    }

    #[test]
    fn test_status_filter() {
        let orders = vec![order(1, "a", true, &[]), order(2, "b", false, &[])];
        assert_eq!(filter_by_status(orders.clone(), StatusFilter::All).len(), 2);
        let done = filter_by_status(orders.clone(), StatusFilter::Completed);
        assert_eq!(done.iter().map(|o| o.order_id.as_i32()).collect::<Vec<_>>(), vec![1]);
        let pending = filter_by_status(orders, StatusFilter::Pending);
        assert_eq!(pending.iter().map(|o| o.order_id.as_i32()).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_search_matches_id_name_and_email() {
        let orders = vec![order(31, "Ada", false, &[]), order(7, "Grace", false, &[])];
        let by_id = pipeline::search(orders.clone(), "31");
        assert_eq!(by_id.len(), 1);
        let by_email = pipeline::search(orders.clone(), "grace@");
        assert_eq!(by_email.len(), 1);
        let by_name = pipeline::search(orders, "ADA");
        assert_eq!(by_name.len(), 1);
    }

    #[test]
    fn test_sort_by_total_desc() {
        let orders = vec![
            order(1, "a", false, &[5]),
            order(2, "b", false, &[20]),
            order(3, "c", false, &[1]),
        ];
        let sorted = pipeline::apply(
            orders,
            CategoryFilter::All,
            "",
            SortConfig::new(OrderSortField::Total, SortDirection::Desc),
        );
        let ids: Vec<i32> = sorted.iter().map(|o| o.order_id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_date_sort_keys_on_order_id() {
        let orders = vec![order(2, "b", false, &[]), order(9, "a", false, &[])];
        let sorted = pipeline::apply(
            orders,
            CategoryFilter::All,
            "",
            SortConfig::new(OrderSortField::Date, SortDirection::Desc),
        );
        let ids: Vec<i32> = sorted.iter().map(|o| o.order_id.as_i32()).collect();
        assert_eq!(ids, vec![9, 2]);
    }
}
