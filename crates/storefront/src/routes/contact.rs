//! Contact / custom-quote form handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use loomline_api::ContactRequest;

use crate::filters;
use crate::state::AppState;

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/show.html")]
pub struct ContactTemplate {
    pub form: ContactRequest,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub project: String,
    pub message: String,
}

impl From<ContactForm> for ContactRequest {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            project: form.project,
            message: form.message,
        }
    }
}

/// Display the quote request form.
pub async fn show() -> impl IntoResponse {
    ContactTemplate {
        form: ContactRequest::default(),
        notice: None,
        error: None,
    }
}

/// Submit a quote request.
///
/// A rejection message from the server is surfaced verbatim; transport
/// failures get the generic try-again text.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    let request = ContactRequest::from(form);

    match state.api().submit_contact(&request).await {
        Ok(receipt) => ContactTemplate {
            form: ContactRequest::default(),
            notice: Some(receipt.message.unwrap_or_else(|| {
                "Message sent successfully! We'll get back to you within 24 hours.".to_string()
            })),
            error: None,
        },
        Err(e) => {
            tracing::error!("Contact submission failed: {e}");
            let message = e.user_message().map_or_else(
                || "Failed to send message. Try again later.".to_string(),
                ToString::to_string,
            );
            ContactTemplate {
                form: request,
                notice: None,
                error: Some(message),
            }
        }
    }
}
