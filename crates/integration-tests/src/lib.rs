//! Test support: an in-process stub of the Loomline remote API.
//!
//! [`StubApi::spawn`] binds an axum server on an ephemeral localhost port
//! and returns a handle whose [`StubApi::base_url`] can be fed straight
//! into `loomline_api::ApiClient::new`. Tests read and mutate the backing
//! [`StubState`] directly to arrange fixtures and assert on captured
//! submissions.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use serde_json::{Value, json};

const CATEGORIES: [&str; 3] = ["bags", "tshirts", "hoodies"];

/// Mutable world the stub serves from.
#[derive(Debug, Default)]
pub struct StubState {
    /// Category slug -> records (category-less, as the real API serves them).
    pub products: HashMap<String, Vec<Value>>,
    pub next_product_id: i64,
    pub orders: Vec<Value>,
    pub inquiries: Vec<Value>,
    pub inquiry_stats: Value,
    pub dashboard_stats: Value,
    pub recent_orders: Vec<Value>,
    /// Captured `POST /orders` bodies.
    pub submitted_orders: Vec<Value>,
    /// Captured `POST /contact` bodies.
    pub contacts: Vec<Value>,
    /// When set, `POST /contact` answers 400 with this error message.
    pub contact_error: Option<String>,
}

impl StubState {
    /// Insert a catalog record and return its assigned id.
    pub fn add_product(&mut self, category: &str, name: &str, price: f64, inspiration: &str) -> i64 {
        self.next_product_id += 1;
        let id = self.next_product_id;
        self.products.entry(category.to_string()).or_default().push(json!({
            "id": id,
            "name": name,
            "price": price,
            "image": format!("https://img.example/{id}.jpg"),
            "inspiration": inspiration,
            "created_at": "2025-03-01T10:00:00Z",
        }));
        id
    }

    /// Insert an order fixture.
    pub fn add_order(&mut self, id: i64, customer: &str, completed: bool, prices: &[f64]) {
        self.orders.push(json!({
            "order_id": id,
            "customer_name": customer,
            "customer_email": format!("{}@example.com", customer.to_lowercase()),
            "instagram_handle": format!("@{}", customer.to_lowercase()),
            "completed": completed,
            "created_at": "2025-03-02T09:00:00Z",
            "items": prices.iter().map(|p| json!({
                "product_type": "tshirts",
                "product_name": "Tide Tee",
                "product_id": 1,
                "price": p,
                "size": "M",
                "quantity": 1,
            })).collect::<Vec<_>>(),
        }));
    }
}

type Shared = Arc<Mutex<StubState>>;

/// Handle to a running stub API server.
pub struct StubApi {
    addr: SocketAddr,
    state: Shared,
}

impl StubApi {
    /// Spawn a stub with empty state.
    pub async fn spawn() -> Self {
        Self::spawn_with(StubState::default()).await
    }

    /// Spawn a stub serving the given state.
    pub async fn spawn_with(state: StubState) -> Self {
        let shared: Shared = Arc::new(Mutex::new(state));

        let app = Router::new()
            .route("/orders", get(list_orders).post(submit_order))
            .route("/orders/{id}", delete(delete_order))
            .route("/orders/{id}/complete", patch(complete_order))
            .route("/orders/{id}/uncomplete", patch(uncomplete_order))
            .route("/custom-orders", get(list_inquiries))
            .route("/custom-orders/stats", get(inquiry_stats))
            .route("/custom-orders/{id}", delete(delete_inquiry))
            .route("/contact", post(submit_contact))
            .route("/dashboard/stats", get(dashboard_stats))
            .route("/dashboard/recent-orders", get(recent_orders))
            .route("/{category}", get(list_category).post(create_product))
            .route(
                "/{category}/{id}",
                axum::routing::put(update_product).delete(delete_product),
            )
            .route(
                "/{category}/inspiration/{inspiration}",
                get(list_inspiration),
            )
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state: shared }
    }

    /// Base URL for `ApiClient::new`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Lock the backing state for arranging fixtures or asserting captures.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned.
    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().expect("stub state lock")
    }
}

fn known_category(slug: &str) -> bool {
    CATEGORIES.contains(&slug)
}

async fn list_category(State(state): State<Shared>, Path(category): Path<String>) -> Response {
    if !known_category(&category) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let state = state.lock().expect("stub state lock");
    let items = state.products.get(&category).cloned().unwrap_or_default();
    Json(items).into_response()
}

async fn list_inspiration(
    State(state): State<Shared>,
    Path((category, inspiration)): Path<(String, String)>,
) -> Response {
    if !known_category(&category) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let state = state.lock().expect("stub state lock");
    let items: Vec<Value> = state
        .products
        .get(&category)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.get("inspiration").and_then(Value::as_str) == Some(&*inspiration))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(items).into_response()
}

async fn create_product(
    State(state): State<Shared>,
    Path(category): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !known_category(&category) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let mut state = state.lock().expect("stub state lock");
    state.next_product_id += 1;
    let id = state.next_product_id;
    let mut record = body;
    if let Some(map) = record.as_object_mut() {
        map.insert("id".to_string(), json!(id));
    }
    state
        .products
        .entry(category)
        .or_default()
        .push(record);
    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

async fn update_product(
    State(state): State<Shared>,
    Path((category, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("stub state lock");
    let Some(items) = state.products.get_mut(&category) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    for item in items.iter_mut() {
        if item.get("id").and_then(Value::as_i64) == Some(id) {
            let mut updated = body;
            if let Some(map) = updated.as_object_mut() {
                map.insert("id".to_string(), json!(id));
            }
            *item = updated;
            return StatusCode::OK.into_response();
        }
    }
    StatusCode::NOT_FOUND.into_response()
}

async fn delete_product(
    State(state): State<Shared>,
    Path((category, id)): Path<(String, i64)>,
) -> Response {
    let mut state = state.lock().expect("stub state lock");
    if let Some(items) = state.products.get_mut(&category) {
        items.retain(|item| item.get("id").and_then(Value::as_i64) != Some(id));
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_orders(State(state): State<Shared>) -> Response {
    let state = state.lock().expect("stub state lock");
    Json(state.orders.clone()).into_response()
}

/// The real service answers order submissions with an arbitrary body; the
/// stub reproduces that so clients must not rely on the shape.
async fn submit_order(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("stub state lock");
    state.submitted_orders.push(body);
    (StatusCode::CREATED, "thanks").into_response()
}

fn set_completed(state: &Shared, id: i64, completed: bool) -> StatusCode {
    let mut state = state.lock().expect("stub state lock");
    for order in &mut state.orders {
        if order.get("order_id").and_then(Value::as_i64) == Some(id) {
            if let Some(map) = order.as_object_mut() {
                map.insert("completed".to_string(), json!(completed));
            }
            return StatusCode::OK;
        }
    }
    StatusCode::NOT_FOUND
}

async fn complete_order(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    set_completed(&state, id, true)
}

async fn uncomplete_order(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    set_completed(&state, id, false)
}

async fn delete_order(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut state = state.lock().expect("stub state lock");
    state
        .orders
        .retain(|order| order.get("order_id").and_then(Value::as_i64) != Some(id));
    StatusCode::NO_CONTENT
}

async fn list_inquiries(State(state): State<Shared>) -> Response {
    let state = state.lock().expect("stub state lock");
    Json(state.inquiries.clone()).into_response()
}

async fn inquiry_stats(State(state): State<Shared>) -> Response {
    let state = state.lock().expect("stub state lock");
    Json(state.inquiry_stats.clone()).into_response()
}

async fn delete_inquiry(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut state = state.lock().expect("stub state lock");
    state
        .inquiries
        .retain(|inquiry| inquiry.get("id").and_then(Value::as_i64) != Some(id));
    StatusCode::NO_CONTENT
}

async fn submit_contact(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("stub state lock");
    if let Some(message) = &state.contact_error {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response();
    }
    state.contacts.push(body);
    Json(json!({ "message": "Message sent successfully!" })).into_response()
}

async fn dashboard_stats(State(state): State<Shared>) -> Response {
    let state = state.lock().expect("stub state lock");
    Json(state.dashboard_stats.clone()).into_response()
}

async fn recent_orders(State(state): State<Shared>) -> Response {
    let state = state.lock().expect("stub state lock");
    Json(state.recent_orders.clone()).into_response()
}
