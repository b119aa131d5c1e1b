//! Error type for remote API calls.
//!
//! Callers are expected to catch every variant at the call site and turn it
//! into either a log line or a user-facing notice; nothing here is fatal.

use thiserror::Error;

/// Failures talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, aborted body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {status}")]
    Status {
        status: reqwest::StatusCode,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The server rejected a submission and provided a message meant for
    /// the user (e.g. the contact endpoint's `error` field).
    #[error("{0}")]
    Rejected(String),

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL is not valid.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl ApiError {
    /// The message to show a user, if this failure carries one.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            _ => None,
        }
    }
}
