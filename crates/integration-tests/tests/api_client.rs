//! End-to-end tests for the API client against the stub server.

#![allow(clippy::unwrap_used)]

use loomline_api::{ApiClient, ProductInput};
use loomline_core::types::{Category, InquiryId, OrderId, ProductId};
use loomline_integration_tests::{StubApi, StubState};
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn listings_are_stamped_with_their_category() {
    let stub = StubApi::spawn().await;
    stub.state().add_product("bags", "Orbit Tote", 1500.0, "space");
    stub.state().add_product("hoodies", "Nebula Hoodie", 2200.0, "space");

    let api = ApiClient::new(&stub.base_url()).unwrap();

    let bags = api.products(Category::Bags).await.unwrap();
    assert_eq!(bags.len(), 1);
    let bag = bags.first().unwrap();
    assert_eq!(bag.category, Category::Bags);
    assert_eq!(bag.name, "Orbit Tote");
    assert_eq!(bag.price, Decimal::new(1500, 0));
}

#[tokio::test]
async fn merged_listing_keeps_the_category_order() {
    let stub = StubApi::spawn().await;
    stub.state().add_product("hoodies", "Nebula Hoodie", 2200.0, "space");
    stub.state().add_product("bags", "Orbit Tote", 1500.0, "space");
    stub.state().add_product("tshirts", "Tide Tee", 950.0, "ocean");

    let api = ApiClient::new(&stub.base_url()).unwrap();
    let all = api.all_products().await.unwrap();

    let categories: Vec<Category> = all.iter().map(|item| item.category).collect();
    assert_eq!(
        categories,
        vec![Category::Bags, Category::Tshirts, Category::Hoodies]
    );
}

#[tokio::test]
async fn inspiration_listing_is_restricted_to_the_theme() {
    let stub = StubApi::spawn().await;
    stub.state().add_product("tshirts", "Tide Tee", 950.0, "ocean");
    stub.state().add_product("tshirts", "Comet Tee", 950.0, "space");

    let api = ApiClient::new(&stub.base_url()).unwrap();
    let items = api.inspiration_items(Category::Tshirts, "ocean").await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items.first().unwrap().name, "Tide Tee");
}

#[tokio::test]
async fn create_then_refetch_observes_the_new_product() {
    let stub = StubApi::spawn().await;
    let api = ApiClient::new(&stub.base_url()).unwrap();

    // Prime the cache with the empty listing.
    assert!(api.products(Category::Bags).await.unwrap().is_empty());

    let input = ProductInput {
        name: "Orbit Tote".to_string(),
        price: Decimal::new(1500, 0),
        image: String::new(),
        inspiration: "space".to_string(),
    };
    api.create_product(Category::Bags, &input).await.unwrap();

    // The full-resync refetch must see the mutation despite the cache.
    let bags = api.products(Category::Bags).await.unwrap();
    assert_eq!(bags.len(), 1);
    assert_eq!(bags.first().unwrap().name, "Orbit Tote");
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let stub = StubApi::spawn().await;
    let id = stub.state().add_product("hoodies", "Nebula Hoodie", 2200.0, "space");

    let api = ApiClient::new(&stub.base_url()).unwrap();
    let id = ProductId::new(i32::try_from(id).unwrap());

    let input = ProductInput {
        name: "Nebula Hoodie v2".to_string(),
        price: Decimal::new(2400, 0),
        image: String::new(),
        inspiration: "space".to_string(),
    };
    api.update_product(Category::Hoodies, id, &input).await.unwrap();

    let hoodies = api.products(Category::Hoodies).await.unwrap();
    assert_eq!(hoodies.first().unwrap().name, "Nebula Hoodie v2");
    assert_eq!(hoodies.first().unwrap().price, Decimal::new(2400, 0));

    api.delete_product(Category::Hoodies, id).await.unwrap();
    assert!(api.products(Category::Hoodies).await.unwrap().is_empty());
}

#[tokio::test]
async fn order_lifecycle_toggles_and_deletes() {
    let stub = StubApi::spawn().await;
    stub.state().add_order(31, "Ada", false, &[950.0, 1500.0]);

    let api = ApiClient::new(&stub.base_url()).unwrap();

    let orders = api.orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    let order = orders.first().unwrap();
    assert!(!order.completed);
    assert_eq!(order.total(), Decimal::new(2450, 0));

    api.complete_order(OrderId::new(31)).await.unwrap();
    assert!(api.orders().await.unwrap().first().unwrap().completed);

    api.uncomplete_order(OrderId::new(31)).await.unwrap();
    assert!(!api.orders().await.unwrap().first().unwrap().completed);

    api.delete_order(OrderId::new(31)).await.unwrap();
    assert!(api.orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn inquiries_and_stats() {
    let stub = StubApi::spawn().await;
    {
        let mut state = stub.state();
        state.inquiries.push(json!({
            "id": 5,
            "name": "Grace",
            "email": "grace@example.com",
            "phone": "+254700000000",
            "project_type": "hoodies",
            "message": "Team hoodies for twelve people",
            "created_at": "2025-03-02T09:00:00Z",
        }));
        state.inquiry_stats = json!({ "total": 1, "recent": 1 });
    }

    let api = ApiClient::new(&stub.base_url()).unwrap();

    let inquiries = api.inquiries().await.unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries.first().unwrap().id, InquiryId::new(5));

    let stats = api.inquiry_stats().await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.recent, 1);

    api.delete_inquiry(InquiryId::new(5)).await.unwrap();
    assert!(api.inquiries().await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_aggregates_parse() {
    let stub = StubApi::spawn().await;
    {
        let mut state = stub.state();
        state.dashboard_stats = json!({
            "total_products": 12,
            "total_orders": 4,
            "total_customers": 3,
            "revenue": 10450.5,
        });
        state.add_order(40, "Ada", true, &[950.0]);
        let order = state.orders.pop().unwrap();
        state.recent_orders.push(order);
    }

    let api = ApiClient::new(&stub.base_url()).unwrap();

    let stats = api.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_products, 12);
    assert_eq!(stats.revenue, Decimal::new(104505, 1));

    let recent = api.recent_orders().await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent.first().unwrap().order_id, OrderId::new(40));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Nothing listens on this port.
    let api = ApiClient::new("http://127.0.0.1:9").unwrap();
    let err = api.orders().await.unwrap_err();
    assert!(matches!(err, loomline_api::ApiError::Transport(_)));
}
