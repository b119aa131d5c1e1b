//! Application state shared across handlers.

use std::sync::Arc;

use loomline_api::{ApiClient, ApiError};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: ApiClient,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is invalid.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_base_url)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, api }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the remote API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}
