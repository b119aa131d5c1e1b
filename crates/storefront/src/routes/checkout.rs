//! Checkout handlers.
//!
//! Validation happens before any network call; a missing customer field
//! never costs a round-trip. A successful submission clears the whole cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use loomline_core::{CustomerDetails, build_order};

use crate::error::Result;
use crate::filters;
use crate::routes::cart::{CartView, cart_id};
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub customer: CustomerDetails,
    pub error: Option<String>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate {
    pub customer_name: String,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_email: String,
    pub instagram_handle: String,
}

impl From<CheckoutForm> for CustomerDetails {
    fn from(form: CheckoutForm) -> Self {
        Self {
            customer_name: form.customer_name,
            customer_email: form.customer_email,
            instagram_handle: form.instagram_handle,
        }
    }
}

/// Display the checkout page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let id = cart_id(&session).await?;
    let cart = state.carts().load(id);
    Ok(CheckoutTemplate {
        cart: CartView::from(&cart),
        customer: CustomerDetails::default(),
        error: None,
    }
    .into_response())
}

/// Validate the customer details, submit the order, and clear the cart.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let id = cart_id(&session).await?;
    let cart = state.carts().load(id);
    let customer = CustomerDetails::from(form);

    // Client-side validation gate: no network call on failure.
    let order = match build_order(&customer, &cart) {
        Ok(order) => order,
        Err(e) => {
            return Ok(CheckoutTemplate {
                cart: CartView::from(&cart),
                customer,
                error: Some(e.to_string()),
            }
            .into_response());
        }
    };

    match state.api().submit_order(&order).await {
        Ok(()) => {
            state.carts().clear(id)?;
            Ok(CheckoutSuccessTemplate {
                customer_name: order.customer_name,
            }
            .into_response())
        }
        Err(e) => {
            tracing::error!("Order submission failed: {e}");
            let message = e
                .user_message()
                .map_or_else(
                    || "Could not place your order. Please try again.".to_string(),
                    ToString::to_string,
                );
            Ok(CheckoutTemplate {
                cart: CartView::from(&cart),
                customer,
                error: Some(message),
            }
            .into_response())
        }
    }
}
