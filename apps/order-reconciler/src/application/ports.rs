//! Central API Port (Driven Port)
//!
//! Interface for the business platform and its delivery-platform
//! integration endpoints. Every network-touching stage of the pipeline
//! goes through this port, so use cases can be tested against mocks.

use async_trait::async_trait;

use crate::domain::{BearerToken, OrderRecord, ServerToken, StoreId, StoreUuid, TimeWindow};

/// Login credentials for the Central auth endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Platform username.
    pub username: String,
    /// Platform password.
    pub password: String,
}

impl Credentials {
    /// Create a new credentials pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// One page of orders from the orders endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersPage {
    /// Orders on this page, in API order.
    pub orders: Vec<OrderRecord>,
    /// Entry count of the raw `data` array, counting entries dropped as
    /// malformed. Zero marks the end of results even when a token is set.
    pub raw_count: usize,
    /// Continuation token for the next page; `None` means end of results.
    pub next_page_token: Option<String>,
}

/// Port-level error for remote API calls.
///
/// "Request failed" and "expected field absent" are deliberately distinct
/// variants so callers can decide per failure whether to abort or skip.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout).
    #[error("transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },

    /// Non-2xx HTTP status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for the log.
        body: String,
    },

    /// Response body could not be parsed.
    #[error("malformed response: {message}")]
    Parse {
        /// Error details.
        message: String,
    },

    /// Response parsed but lacked an expected field.
    #[error("missing expected field: {field}")]
    MissingField {
        /// Dotted path of the absent field.
        field: &'static str,
    },
}

/// Port for the Central platform and its delivery integration.
#[async_trait]
pub trait CentralApiPort: Send + Sync {
    /// Exchange credentials for a session bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<BearerToken, ApiError>;

    /// Fetch the delivery-platform server token from the client configuration.
    async fn server_token(&self, bearer: &BearerToken) -> Result<ServerToken, ApiError>;

    /// Resolve a store identifier to the delivery platform's store UUID.
    async fn store_uuid(
        &self,
        bearer: &BearerToken,
        store_id: &StoreId,
    ) -> Result<StoreUuid, ApiError>;

    /// Fetch one page of orders for a store within the time window.
    async fn orders_page(
        &self,
        token: &ServerToken,
        store_uuid: &StoreUuid,
        window: &TimeWindow,
        page_token: Option<&str>,
    ) -> Result<OrdersPage, ApiError>;
}
