//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use loomline_core::types::price;
use loomline_core::{DashboardStats, Order};

use crate::filters;
use crate::state::AppState;

/// One stat tile.
pub struct StatTileView {
    pub title: &'static str,
    pub value: String,
    pub description: &'static str,
}

/// One recent-order row.
pub struct RecentOrderView {
    pub id: i32,
    pub customer_name: String,
    pub item_count: usize,
    pub first_item: Option<String>,
    pub amount: String,
    pub completed: bool,
    pub detail_href: String,
}

impl From<&Order> for RecentOrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.order_id.as_i32(),
            customer_name: order.customer_name.clone(),
            item_count: order.items.len(),
            first_item: order.items.first().map(|item| item.product_name.clone()),
            amount: price::display(order.total()),
            completed: order.completed,
            detail_href: format!("/orders/{}", order.order_id),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub tiles: Vec<StatTileView>,
    pub recent: Vec<RecentOrderView>,
}

fn tiles(stats: &DashboardStats) -> Vec<StatTileView> {
    vec![
        StatTileView {
            title: "Total Products",
            value: stats.total_products.to_string(),
            description: "Active designs",
        },
        StatTileView {
            title: "Total Orders",
            value: stats.total_orders.to_string(),
            description: "This month",
        },
        StatTileView {
            title: "Revenue",
            value: price::display(stats.revenue),
            description: "This month",
        },
        StatTileView {
            title: "Customers",
            value: stats.total_customers.to_string(),
            description: "Active users",
        },
    ]
}

/// Dashboard page. Each aggregate degrades independently: a failed fetch
/// logs and renders as empty rather than failing the page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let stats = match state.api().dashboard_stats().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Failed to load dashboard stats: {e}");
            DashboardStats::default()
        }
    };
    let recent = match state.api().recent_orders().await {
        Ok(orders) => orders,
        Err(e) => {
            tracing::error!("Failed to load recent orders: {e}");
            Vec::new()
        }
    };

    DashboardTemplate {
        tiles: tiles(&stats),
        recent: recent.iter().map(RecentOrderView::from).collect(),
    }
}
