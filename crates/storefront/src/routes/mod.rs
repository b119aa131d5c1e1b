//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                    - Home page
//! GET  /health                              - Health check
//!
//! # Catalog
//! GET  /{category}                          - Browse a category by inspiration
//! GET  /{category}/inspiration/{theme}      - All items of one theme
//!
//! # Cart
//! GET  /cart                                - Cart page
//! POST /cart/add                            - Add a catalog item to the cart
//! POST /cart/remove                         - Remove all lines with an id
//!
//! # Checkout
//! GET  /checkout                            - Customer details + summary
//! POST /checkout                            - Validate, submit, clear cart
//!
//! # Contact
//! GET  /contact                             - Custom-project quote form
//! POST /contact                             - Submit the quote request
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod home;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    routing::{get, post},
};

use crate::filters;
use crate::state::AppState;

/// Shared error page with a try-again affordance.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPageTemplate {
    pub message: String,
    pub retry_href: String,
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
        // Contact / quote requests
        .route("/contact", get(contact::show).post(contact::submit))
        // Catalog routes; static paths above take precedence over the
        // category parameter
        .route("/{category}", get(catalog::browse))
        .route("/{category}/inspiration/{theme}", get(catalog::theme))
}
