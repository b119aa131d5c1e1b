//! Checkout: turning a cart into an order submission payload.
//!
//! The payload is only built once the customer details pass validation;
//! a missing field stops the flow before any network call is made.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::types::{ProductId, price};

/// Customer details collected by the checkout form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub customer_name: String,
    pub customer_email: String,
    pub instagram_handle: String,
}

/// Checkout validation failures, surfaced to the shopper before any network
/// round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Please enter your Instagram handle")]
    MissingInstagram,
}

/// One line of an order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_type: String,
    pub product_name: String,
    pub product_id: ProductId,
    #[serde(with = "price::lenient")]
    pub price: Decimal,
    pub size: Option<String>,
    pub quantity: u32,
}

/// The `POST /orders` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub instagram_handle: String,
    pub items: Vec<NewOrderItem>,
}

/// Build the order payload for a cart.
///
/// Every cart line maps to one order item with quantity 1; the cart model
/// never merges duplicates, so quantities are not aggregated here either.
///
/// # Errors
///
/// Returns the first missing customer field. Whitespace-only input counts
/// as missing. No payload is produced on failure.
pub fn build_order(customer: &CustomerDetails, cart: &Cart) -> Result<NewOrder, CheckoutError> {
    if customer.customer_name.trim().is_empty() {
        return Err(CheckoutError::MissingName);
    }
    if customer.customer_email.trim().is_empty() {
        return Err(CheckoutError::MissingEmail);
    }
    if customer.instagram_handle.trim().is_empty() {
        return Err(CheckoutError::MissingInstagram);
    }

    let items = cart
        .items()
        .iter()
        .map(|item| NewOrderItem {
            product_type: item
                .category
                .map_or_else(|| "product".to_string(), |cat| cat.slug().to_string()),
            product_name: item.name.clone(),
            product_id: item.id,
            price: item.price,
            size: item.size.clone(),
            quantity: 1,
        })
        .collect();

    Ok(NewOrder {
        customer_name: customer.customer_name.trim().to_string(),
        customer_email: customer.customer_email.trim().to_string(),
        instagram_handle: customer.instagram_handle.trim().to_string(),
        items,
    })
}
