//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                   - Dashboard
//! GET  /health                             - Health check
//!
//! # Products
//! GET  /products                           - Merged catalog (filter/sort/search)
//! GET  /products/new                       - Create form
//! POST /products                           - Create
//! GET  /products/{category}/{id}/edit      - Edit form
//! POST /products/{category}/{id}           - Update
//! POST /products/{category}/{id}/delete    - Delete (confirm-gated)
//!
//! # Orders
//! GET  /orders                             - Orders table (status/search/sort)
//! GET  /orders/{id}                        - Order detail
//! POST /orders/{id}/complete               - Mark completed
//! POST /orders/{id}/uncomplete             - Mark pending
//! POST /orders/{id}/delete                 - Delete (confirm-gated)
//!
//! # Custom-order inquiries
//! GET  /custom-orders                      - Inquiries table + stats
//! POST /custom-orders/{id}/delete          - Delete (confirm-gated)
//! ```

pub mod dashboard;
pub mod inquiries;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new))
        .route("/{category}/{id}", post(products::update))
        .route("/{category}/{id}/edit", get(products::edit))
        .route("/{category}/{id}/delete", post(products::delete))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/complete", post(orders::complete))
        .route("/{id}/uncomplete", post(orders::uncomplete))
        .route("/{id}/delete", post(orders::delete))
}

/// Create the inquiry routes router.
pub fn inquiry_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(inquiries::index))
        .route("/{id}/delete", post(inquiries::delete))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/custom-orders", inquiry_routes())
}
