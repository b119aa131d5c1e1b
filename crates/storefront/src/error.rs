//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding. Route handlers return `Result<T, AppError>`
//! when they cannot degrade more gracefully; remote-call failures that have
//! a sensible fallback view are handled at the call site instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use loomline_api::ApiError;

use crate::cart_store::CartStoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Cart slot could not be written.
    #[error("Cart storage error: {0}")]
    CartStore(#[from] CartStoreError),

    /// Session read/write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Api(_) | Self::CartStore(_) | Self::Session(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Api(_) => StatusCode::BAD_GATEWAY,
            Self::CartStore(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Api(_) => "Upstream service error".to_string(),
            Self::CartStore(_) | Self::Session(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
