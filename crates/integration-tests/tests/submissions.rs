//! Submission flows: checkout order posting and contact requests.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use loomline_api::{ApiClient, ApiError, ContactRequest};
use loomline_core::types::Category;
use loomline_core::{Cart, CartItem, CatalogItem, CustomerDetails, build_order};
use loomline_core::types::ProductId;
use loomline_integration_tests::StubApi;
use rust_decimal::Decimal;
use serde_json::Value;

fn catalog_item(id: i32, name: &str, price: i64) -> CatalogItem {
    CatalogItem {
        id: ProductId::new(id),
        category: Category::Tshirts,
        name: name.to_string(),
        price: Decimal::new(price, 0),
        image: String::new(),
        inspiration: "ocean".to_string(),
        created_at: None,
    }
}

#[tokio::test]
async fn checkout_payload_reaches_the_server_intact() {
    let stub = StubApi::spawn().await;
    let api = ApiClient::new(&stub.base_url()).unwrap();

    let mut cart = Cart::new();
    cart.add(CartItem::from_catalog(
        &catalog_item(8, "Tide Tee", 950),
        Some("M".to_string()),
        Utc::now(),
    ));
    cart.add(CartItem::from_catalog(
        &catalog_item(9, "Reef Tee", 950),
        None,
        Utc::now(),
    ));

    let customer = CustomerDetails {
        customer_name: "Wanjiru K".to_string(),
        customer_email: "wanjiru@example.com".to_string(),
        instagram_handle: "@wanjiru.makes".to_string(),
    };
    let order = build_order(&customer, &cart).unwrap();

    // The stub answers 201 with a plain-text body; that must still count
    // as success.
    api.submit_order(&order).await.unwrap();

    let state = stub.state();
    assert_eq!(state.submitted_orders.len(), 1);
    let captured = state.submitted_orders.first().unwrap();
    assert_eq!(
        captured.get("customer_name").and_then(Value::as_str),
        Some("Wanjiru K")
    );

    let items = captured.get("items").and_then(Value::as_array).unwrap();
    assert_eq!(items.len(), 2);
    let first = items.first().unwrap();
    assert_eq!(first.get("product_type").and_then(Value::as_str), Some("tshirts"));
    assert_eq!(first.get("quantity").and_then(Value::as_u64), Some(1));
    assert_eq!(first.get("size").and_then(Value::as_str), Some("M"));
    assert!(items.get(1).unwrap().get("size").unwrap().is_null());
}

#[tokio::test]
async fn contact_success_returns_the_server_message() {
    let stub = StubApi::spawn().await;
    let api = ApiClient::new(&stub.base_url()).unwrap();

    let receipt = api
        .submit_contact(&ContactRequest {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            phone: "+254700000000".to_string(),
            project: "hoodies".to_string(),
            message: "Team hoodies for twelve people".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(receipt.message.as_deref(), Some("Message sent successfully!"));
    assert_eq!(stub.state().contacts.len(), 1);
}

#[tokio::test]
async fn contact_rejection_surfaces_the_error_verbatim() {
    let stub = StubApi::spawn().await;
    stub.state().contact_error = Some("Email address is required".to_string());

    let api = ApiClient::new(&stub.base_url()).unwrap();
    let err = api
        .submit_contact(&ContactRequest::default())
        .await
        .unwrap_err();

    match err {
        ApiError::Rejected(message) => assert_eq!(message, "Email address is required"),
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(stub.state().contacts.is_empty());
}

#[tokio::test]
async fn missing_customer_fields_never_reach_the_network() {
    let stub = StubApi::spawn().await;

    let mut cart = Cart::new();
    cart.add(CartItem::from_catalog(
        &catalog_item(8, "Tide Tee", 950),
        None,
        Utc::now(),
    ));

    let incomplete = CustomerDetails {
        customer_name: "Wanjiru K".to_string(),
        customer_email: String::new(),
        instagram_handle: "@wanjiru.makes".to_string(),
    };
    assert!(build_order(&incomplete, &cart).is_err());

    // The validation gate fired before any request was issued.
    assert!(stub.state().submitted_orders.is_empty());
}
