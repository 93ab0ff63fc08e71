//! Central adapter configuration.

use std::time::Duration;

use crate::domain::{StoreId, StoreUuid};

/// Default base URL for the Central platform API.
const DEFAULT_CENTRAL_BASE_URL: &str = "https://api.centralhq.io";

/// Default base URL for the delivery-platform orders API.
const DEFAULT_DELIVERY_BASE_URL: &str = "https://api.uber.com";

/// Configuration for the Central API adapter.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Central platform.
    pub central_base_url: String,
    /// Base URL of the delivery platform's orders API.
    pub delivery_base_url: String,
    /// Client slug embedded in Central URLs.
    pub client: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration for `client` with default base URLs.
    #[must_use]
    pub fn new(client: impl Into<String>) -> Self {
        Self {
            central_base_url: DEFAULT_CENTRAL_BASE_URL.to_string(),
            delivery_base_url: DEFAULT_DELIVERY_BASE_URL.to_string(),
            client: client.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the Central base URL.
    #[must_use]
    pub fn with_central_base_url(mut self, url: impl Into<String>) -> Self {
        self.central_base_url = url.into();
        self
    }

    /// Override the delivery-platform base URL.
    #[must_use]
    pub fn with_delivery_base_url(mut self, url: impl Into<String>) -> Self {
        self.delivery_base_url = url.into();
        self
    }

    /// Override the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the auth endpoint.
    #[must_use]
    pub fn auth_url(&self) -> String {
        format!("{}/v1/{}/auth", self.central_base_url, self.client)
    }

    /// URL of the client configuration endpoint.
    #[must_use]
    pub fn configuration_url(&self) -> String {
        format!("{}/v1/{}/configuration", self.central_base_url, self.client)
    }

    /// URL of the store configuration endpoint for `store_id`.
    #[must_use]
    pub fn store_configuration_url(&self, store_id: &StoreId) -> String {
        format!(
            "{}/v1/{}/stores/{}/configuration",
            self.central_base_url, self.client, store_id
        )
    }

    /// URL of the orders endpoint for `store_uuid`.
    #[must_use]
    pub fn orders_url(&self, store_uuid: &StoreUuid) -> String {
        format!("{}/v1/stores/{}/orders", self.delivery_base_url, store_uuid)
    }
}
