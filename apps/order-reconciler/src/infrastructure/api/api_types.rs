//! Central / delivery-platform wire types.
//!
//! These map directly to the REST payloads. Optional at every nesting level:
//! absence is reported as a typed missing-field error by the adapter, never
//! a deserialization failure.

use serde::{Deserialize, Serialize};

/// Auth-type flag for user-credential logins.
pub const AUTH_TYPE_USER: &str = "U";

// ============================================================================
// Auth
// ============================================================================

/// Login request body for the auth endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Platform username.
    pub username: &'a str,
    /// Platform password.
    pub psw: &'a str,
    /// Authentication type flag.
    pub auth_type: &'a str,
}

/// Login response from the auth endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Session bearer token.
    #[serde(default)]
    pub token: Option<String>,
}

// ============================================================================
// Client configuration
// ============================================================================

/// Response from the client configuration endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationResponse {
    /// Configuration payload.
    #[serde(default)]
    pub data: Option<ConfigurationData>,
}

/// Configuration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationData {
    /// Per-integration settings, keyed by integration name.
    #[serde(rename = "INTEGRATIONS", default)]
    pub integrations: Option<Integrations>,
}

/// Integration settings block.
#[derive(Debug, Clone, Deserialize)]
pub struct Integrations {
    /// Uber integration settings.
    #[serde(rename = "UBER", default)]
    pub uber: Option<UberIntegration>,
}

/// Uber integration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UberIntegration {
    /// Server token used as bearer auth against the orders API.
    #[serde(default)]
    pub server_token: Option<String>,
}

// ============================================================================
// Store configuration
// ============================================================================

/// Response from the store configuration endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfigurationResponse {
    /// Store configuration entries; the first one carries the UUID.
    #[serde(default)]
    pub data: Vec<StoreConfigurationEntry>,
}

/// One store configuration entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfigurationEntry {
    /// Delivery platform's UUID for the store.
    #[serde(default)]
    pub uber_uuid: Option<String>,
}

// ============================================================================
// Orders
// ============================================================================

/// Response from the orders endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersResponse {
    /// Orders on this page, kept as raw JSON so unknown shapes surface as
    /// per-order warnings instead of failing the page.
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    /// Pagination metadata.
    #[serde(default)]
    pub pagination_data: Option<PaginationData>,
}

/// Pagination metadata on an orders response.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationData {
    /// Continuation token; absent or empty means end of results.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl OrdersResponse {
    /// Continuation token, with the API's empty-string sentinel normalized
    /// to `None`.
    #[must_use]
    pub fn next_page_token(&self) -> Option<&str> {
        self.pagination_data
            .as_ref()
            .and_then(|p| p.next_page_token.as_deref())
            .filter(|token| !token.is_empty())
    }
}
