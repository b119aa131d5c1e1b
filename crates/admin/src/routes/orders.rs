//! Orders manager: search, status filter, sorting, detail view, and the
//! order lifecycle actions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use loomline_core::types::{CategoryFilter, OrderId, price};
use loomline_core::{
    Order, OrderSortField, SortConfig, SortDirection, StatusFilter, orders, pipeline,
};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{SortLink, format_date};

/// One row of the orders table.
pub struct OrderRowView {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub items_preview: Vec<String>,
    pub more_items: usize,
    pub total: String,
    pub completed: bool,
    pub detail_href: String,
    pub toggle_action: String,
    pub toggle_label: &'static str,
    pub delete_action: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        let id = order.order_id.as_i32();
        Self {
            id,
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
            items_preview: order
                .items
                .iter()
                .take(2)
                .map(|item| format!("{}x {}", item.quantity, item.product_name))
                .collect(),
            more_items: order.items.len().saturating_sub(2),
            total: price::display(order.total()),
            completed: order.completed,
            detail_href: format!("/orders/{id}"),
            toggle_action: if order.completed {
                format!("/orders/{id}/uncomplete")
            } else {
                format!("/orders/{id}/complete")
            },
            toggle_label: if order.completed { "Undo" } else { "Complete" },
            delete_action: format!("/orders/{id}/delete"),
        }
    }
}

/// One line of the order detail table.
pub struct OrderLineView {
    pub product_name: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Orders list template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderRowView>,
    pub count: usize,
    pub query: String,
    pub status: &'static str,
    pub sort_links: Vec<SortLink>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub instagram_handle: String,
    pub date: String,
    pub completed: bool,
    pub lines: Vec<OrderLineView>,
    pub total: String,
    pub toggle_action: String,
    pub toggle_label: &'static str,
}

/// Orders list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl OrdersQuery {
    /// Resolve into pipeline configuration; the screen defaults to all
    /// statuses, sorted by date descending.
    fn resolve(&self) -> (StatusFilter, String, SortConfig<OrderSortField>) {
        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let query = self.q.clone().unwrap_or_default();
        let field = self
            .sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let direction = self
            .dir
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(SortDirection::Desc);
        (status, query, SortConfig::new(field, direction))
    }
}

fn sort_links(config: SortConfig<OrderSortField>, query: &OrdersQuery) -> Vec<SortLink> {
    let mut extra = String::new();
    if let Some(status) = &query.status {
        extra.push_str(&format!("&status={status}"));
    }
    if let Some(q) = &query.q {
        extra.push_str(&format!("&q={}", urlencoding_encode(q)));
    }

    [
        ("Date", OrderSortField::Date),
        ("Total", OrderSortField::Total),
        ("Name", OrderSortField::Name),
    ]
    .into_iter()
    .map(|(label, field)| {
        SortLink::build(
            label,
            "/orders",
            field,
            OrderSortField::slug,
            config,
            SortDirection::Desc,
            &extra,
        )
    })
    .collect()
}

fn urlencoding_encode(raw: &str) -> String {
    raw.replace('%', "%25").replace('&', "%26").replace(' ', "%20")
}

/// Orders list page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<OrdersQuery>) -> Response {
    let all = match state.api().orders().await {
        Ok(orders) => orders,
        Err(e) => {
            tracing::error!("Failed to fetch orders: {e}");
            Vec::new()
        }
    };

    let (status, q, config) = query.resolve();
    let narrowed = pipeline::apply(
        orders::filter_by_status(all, status),
        CategoryFilter::All,
        &q,
        config,
    );

    OrdersIndexTemplate {
        count: narrowed.len(),
        orders: narrowed.iter().map(OrderRowView::from).collect(),
        query: q,
        status: status.slug(),
        sort_links: sort_links(config, &query),
    }
    .into_response()
}

/// Order detail page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let id = OrderId::new(id);
    let all = state.api().orders().await?;
    let Some(order) = all.iter().find(|order| order.order_id == id) else {
        return Err(AppError::NotFound(format!("order {id}")));
    };

    let lines = order
        .items
        .iter()
        .map(|item| OrderLineView {
            product_name: item.product_name.clone(),
            size: item.size.clone().unwrap_or_else(|| "-".to_string()),
            quantity: item.quantity,
            price: price::display(item.price),
            line_total: price::display(item.line_total()),
        })
        .collect();

    Ok(OrderShowTemplate {
        id: id.as_i32(),
        customer_name: order.customer_name.clone(),
        customer_email: order.customer_email.clone(),
        instagram_handle: order
            .instagram_handle
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        date: format_date(order.created_at),
        completed: order.completed,
        lines,
        total: price::display(order.total()),
        toggle_action: if order.completed {
            format!("/orders/{id}/uncomplete")
        } else {
            format!("/orders/{id}/complete")
        },
        toggle_label: if order.completed {
            "Mark as Pending"
        } else {
            "Mark as Completed"
        },
    }
    .into_response())
}

/// Mark an order completed, then resync via redirect.
#[instrument(skip(state))]
pub async fn complete(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    if let Err(e) = state.api().complete_order(OrderId::new(id)).await {
        tracing::error!("Failed to complete order {id}: {e}");
    }
    Redirect::to("/orders").into_response()
}

/// Mark an order pending again, then resync via redirect.
#[instrument(skip(state))]
pub async fn uncomplete(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    if let Err(e) = state.api().uncomplete_order(OrderId::new(id)).await {
        tracing::error!("Failed to uncomplete order {id}: {e}");
    }
    Redirect::to("/orders").into_response()
}

/// Delete an order, then resync via redirect. The confirmation gate lives
/// in the template.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    if let Err(e) = state.api().delete_order(OrderId::new(id)).await {
        tracing::error!("Failed to delete order {id}: {e}");
    }
    Redirect::to("/orders").into_response()
}
