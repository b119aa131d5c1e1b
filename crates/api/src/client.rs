//! The remote API client.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use loomline_core::{
    CatalogItem, CustomInquiry, DashboardStats, InquiryStats, NewOrder, Order,
    types::{Category, InquiryId, OrderId, ProductId},
};

use crate::cache::{CacheKey, CachedItems};
use crate::error::ApiError;
use crate::types::{ContactReceipt, ContactRequest, ErrorBody, ProductInput, ProductRecord};

/// Catalog reads are cached this long.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Client for the Loomline remote REST API.
///
/// Cheap to clone; all clones share the HTTP connection pool and the
/// catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    catalog_cache: Cache<CacheKey, CachedItems>,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    ///
    /// No request timeout is configured: requests run until the server
    /// answers or the transport fails, and nothing is retried
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BaseUrl`] if `base_url` does not parse as an
    /// HTTP(S) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // Normalise the trailing slash so joined paths land under the base
        // rather than replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)?;

        let catalog_cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
                catalog_cache,
            }),
        })
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch JSON from a GET endpoint.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a mutation and require a success status; the body is ignored.
    async fn send_expect_success(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "API mutation failed"
        );
        Err(ApiError::Status { status, body })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch one category's items, stamped with their category.
    ///
    /// Results are cached for five minutes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn products(&self, category: Category) -> Result<Vec<CatalogItem>, ApiError> {
        let key = CacheKey::Category(category);
        if let Some(items) = self.inner.catalog_cache.get(&key).await {
            debug!("cache hit for category listing");
            return Ok(items.as_ref().clone());
        }

        let records: Vec<ProductRecord> =
            self.get_json(self.endpoint(&[category.slug()])).await?;
        let items: Vec<CatalogItem> = records
            .into_iter()
            .map(|record| record.into_item(category))
            .collect();

        self.inner
            .catalog_cache
            .insert(key, Arc::new(items.clone()))
            .await;
        Ok(items)
    }

    /// Fetch all three categories concurrently and merge them in the fixed
    /// bags, tshirts, hoodies order.
    ///
    /// # Errors
    ///
    /// Fails if any of the three listings fails.
    #[instrument(skip(self))]
    pub async fn all_products(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let (mut bags, tshirts, hoodies) = tokio::try_join!(
            self.products(Category::Bags),
            self.products(Category::Tshirts),
            self.products(Category::Hoodies),
        )?;
        bags.extend(tshirts);
        bags.extend(hoodies);
        Ok(bags)
    }

    /// Fetch every item of one inspiration theme within a category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn inspiration_items(
        &self,
        category: Category,
        inspiration: &str,
    ) -> Result<Vec<CatalogItem>, ApiError> {
        let key = CacheKey::Inspiration(category, inspiration.to_string());
        if let Some(items) = self.inner.catalog_cache.get(&key).await {
            debug!("cache hit for inspiration listing");
            return Ok(items.as_ref().clone());
        }

        let records: Vec<ProductRecord> = self
            .get_json(self.endpoint(&[category.slug(), "inspiration", inspiration]))
            .await?;
        let items: Vec<CatalogItem> = records
            .into_iter()
            .map(|record| record.into_item(category))
            .collect();

        self.inner
            .catalog_cache
            .insert(key, Arc::new(items.clone()))
            .await;
        Ok(items)
    }

    /// Create a product under a category sub-resource.
    ///
    /// The caller refetches the listing afterwards; the cache is
    /// invalidated here so the refetch observes the change.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-success response.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(
        &self,
        category: Category,
        input: &ProductInput,
    ) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint(&[category.slug()]))
            .json(input);
        self.send_expect_success(request).await?;
        self.inner.catalog_cache.invalidate_all();
        Ok(())
    }

    /// Update an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-success response.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_product(
        &self,
        category: Category,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .put(self.endpoint(&[category.slug(), &id.to_string()]))
            .json(input);
        self.send_expect_success(request).await?;
        self.inner.catalog_cache.invalidate_all();
        Ok(())
    }

    /// Delete a product. The caller is responsible for the destructive
    /// confirmation step before invoking this.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-success response.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, category: Category, id: ProductId) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .delete(self.endpoint(&[category.slug(), &id.to_string()]));
        self.send_expect_success(request).await?;
        self.inner.catalog_cache.invalidate_all();
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch all orders.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json(self.endpoint(&["orders"])).await
    }

    /// Mark an order completed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-success response.
    #[instrument(skip(self))]
    pub async fn complete_order(&self, id: OrderId) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .patch(self.endpoint(&["orders", &id.to_string(), "complete"]));
        self.send_expect_success(request).await
    }

    /// Mark an order pending again.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-success response.
    #[instrument(skip(self))]
    pub async fn uncomplete_order(&self, id: OrderId) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .patch(self.endpoint(&["orders", &id.to_string(), "uncomplete"]));
        self.send_expect_success(request).await
    }

    /// Delete an order. Confirmation is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-success response.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .delete(self.endpoint(&["orders", &id.to_string()]));
        self.send_expect_success(request).await
    }

    /// Submit a checkout order.
    ///
    /// Any 2xx response counts as success; the body is not inspected, since
    /// the server is free to answer with whatever shape it likes. On a
    /// rejection, the body's `error` field (if present) is surfaced
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server's message, or
    /// [`ApiError::Status`] if the rejection carried no message.
    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn submit_order(&self, order: &NewOrder) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint(&["orders"]))
            .json(order)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "order submission failed"
        );
        let envelope: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        match envelope.error {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Err(ApiError::Status { status, body }),
        }
    }

    // =========================================================================
    // Custom-order inquiries
    // =========================================================================

    /// Fetch all custom-order inquiries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn inquiries(&self) -> Result<Vec<CustomInquiry>, ApiError> {
        self.get_json(self.endpoint(&["custom-orders"])).await
    }

    /// Fetch inquiry volume counters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn inquiry_stats(&self) -> Result<InquiryStats, ApiError> {
        self.get_json(self.endpoint(&["custom-orders", "stats"])).await
    }

    /// Delete an inquiry. Confirmation is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-success response.
    #[instrument(skip(self))]
    pub async fn delete_inquiry(&self, id: InquiryId) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .delete(self.endpoint(&["custom-orders", &id.to_string()]));
        self.send_expect_success(request).await
    }

    /// Submit a contact / quote request.
    ///
    /// On a non-2xx response the body's `error` field is surfaced verbatim
    /// as [`ApiError::Rejected`] so the storefront can show it to the user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server's message, or
    /// [`ApiError::Status`] if the rejection carried no message.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn submit_contact(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactReceipt, ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint(&["contact"]))
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            // A missing or unparseable body still counts as a successful
            // submission; the receipt message is optional.
            return Ok(serde_json::from_str(&body).unwrap_or_default());
        }

        let envelope: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        match envelope.error {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Err(ApiError::Status { status, body }),
        }
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Fetch aggregate store metrics.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json(self.endpoint(&["dashboard", "stats"])).await
    }

    /// Fetch the most recent orders for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn recent_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json(self.endpoint(&["dashboard", "recent-orders"]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_and_encodes_segments() {
        let client = ApiClient::new("http://127.0.0.1:5555").expect("valid base");
        let url = client.endpoint(&["hoodies", "inspiration", "outer space"]);
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5555/hoodies/inspiration/outer%20space"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalised() {
        let client = ApiClient::new("http://api.example/v1/").expect("valid base");
        let url = client.endpoint(&["orders"]);
        assert_eq!(url.as_str(), "http://api.example/v1/orders");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(ApiClient::new("not a url").is_err());
    }
}
