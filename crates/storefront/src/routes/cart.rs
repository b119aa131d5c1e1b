//! Cart route handlers.
//!
//! The cart id lives in the session; the cart itself lives in the cart
//! store, read at page load and rewritten as a whole on every mutation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use loomline_core::types::{Category, ProductId, price};
use loomline_core::{Cart, CartItem};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Session key holding the shopper's cart id.
pub const CART_ID_KEY: &str = "cart_id";

/// Get the cart id from the session, minting one on first use.
pub async fn cart_id(session: &Session) -> Result<Uuid> {
    if let Some(id) = session.get::<Uuid>(CART_ID_KEY).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(CART_ID_KEY, id).await?;
    Ok(id)
}

/// Cart line display data for templates.
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub detail: String,
    pub price: String,
    pub image: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        let mut detail_parts: Vec<String> = Vec::new();
        if let Some(inspiration) = &item.inspiration {
            detail_parts.push(inspiration.clone());
        }
        if let Some(category) = item.category {
            detail_parts.push(category.label().to_string());
        }
        if let Some(size) = &item.size {
            detail_parts.push(format!("Size {size}"));
        }

        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            detail: detail_parts.join(" - "),
            price: price::display(item.price),
            image: item.image.clone(),
        }
    }
}

/// Cart display data for templates.
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub count: usize,
    pub subtotal: String,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = price::display(cart.total());
        Self {
            lines: cart.items().iter().map(CartLineView::from).collect(),
            count: cart.len(),
            // Shipping is free, so the subtotal and total always agree.
            subtotal: total.clone(),
            total,
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub category: String,
    pub id: i32,
    pub inspiration: String,
    pub size: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: i32,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let id = cart_id(&session).await?;
    let cart = state.carts().load(id);
    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
    }
    .into_response())
}

/// Add a catalog item to the cart, then bounce back to the theme page.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let category = form
        .category
        .parse::<Category>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let product_id = ProductId::new(form.id);

    // The theme listing is cached, so this lookup normally costs nothing.
    let items = state
        .api()
        .inspiration_items(category, &form.inspiration)
        .await?;
    let Some(item) = items.iter().find(|item| item.id == product_id) else {
        return Err(AppError::NotFound(format!("product {product_id}")));
    };

    let size = form.size.filter(|s| !s.is_empty());
    let line = CartItem::from_catalog(item, size, Utc::now());

    let id = cart_id(&session).await?;
    let mut cart = state.carts().load(id);
    cart.add(line);
    state.carts().save(id, &cart)?;

    let back = format!(
        "/{}/inspiration/{}?added={}",
        category.slug(),
        urlencoding::encode(&form.inspiration),
        form.id
    );
    Ok(Redirect::to(&back).into_response())
}

/// Remove all cart lines with the given id.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = cart_id(&session).await?;
    let mut cart = state.carts().load(id);
    cart.remove(ProductId::new(form.id));
    state.carts().save(id, &cart)?;
    Ok(Redirect::to("/cart").into_response())
}
