//! Application state shared across handlers.

use std::sync::Arc;

use loomline_api::{ApiClient, ApiError};

use crate::cart_store::{CartStore, FileCartStore};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the remote API
/// client, and the cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    carts: Arc<dyn CartStore>,
}

impl AppState {
    /// Create application state from configuration, wiring the file-backed
    /// cart store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is invalid.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_base_url)?;
        let carts: Arc<dyn CartStore> = Arc::new(FileCartStore::new(config.cart_dir.clone()));
        Ok(Self::with_parts(config, api, carts))
    }

    /// Create application state from explicit parts. Tests use this to
    /// inject a stub API client and the in-memory cart store.
    #[must_use]
    pub fn with_parts(config: StorefrontConfig, api: ApiClient, carts: Arc<dyn CartStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, api, carts }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the remote API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &dyn CartStore {
        self.inner.carts.as_ref()
    }
}
