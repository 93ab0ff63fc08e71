//! Run configuration.
//!
//! Parsed once at startup from environment variables into an immutable
//! structure passed through the pipeline by parameter; nothing reads the
//! environment after this point.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::application::ports::Credentials;
use crate::domain::{StoreId, TimeWindow};
use crate::infrastructure::api::ApiConfig;

/// Default path of the processed-order ledger.
const DEFAULT_LEDGER_PATH: &str = "./processed_orders.csv";

/// Default path of the fetched-orders snapshot.
const DEFAULT_SNAPSHOT_PATH: &str = "./orders.json";

/// Default HTTP request timeout in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    #[error("required environment variable {name} is not set")]
    MissingVar {
        /// Variable name.
        name: &'static str,
    },

    /// A variable is present but unusable.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Immutable configuration for one reconciliation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Client slug embedded in Central URLs.
    pub client: String,
    /// Central platform username.
    pub username: String,
    /// Central platform password.
    pub password: String,
    /// Stores to fetch orders for.
    pub store_ids: Vec<StoreId>,
    /// Requested order time window.
    pub window: TimeWindow,
    /// Central base URL override, when set.
    pub central_base_url: Option<String>,
    /// Delivery-platform base URL override, when set.
    pub delivery_base_url: Option<String>,
    /// Path of the processed-order ledger CSV.
    pub ledger_path: PathBuf,
    /// Path the fetched-orders snapshot is written to.
    pub snapshot_path: PathBuf,
    /// HTTP request timeout.
    pub http_timeout: Duration,
}

impl RunConfig {
    /// Parse the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Parse the configuration from an arbitrary variable source.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            get(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingVar { name })
        };

        let store_ids = parse_store_ids(&required("STORE_IDS")?)?;

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "HTTP_TIMEOUT_SECS",
                    message: format!("'{raw}' is not a number of seconds"),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            client: required("CENTRAL_CLIENT")?,
            username: required("CENTRAL_USERNAME")?,
            password: required("CENTRAL_PASSWORD")?,
            store_ids,
            window: TimeWindow::new(
                required("ORDERS_START_TIME")?,
                required("ORDERS_END_TIME")?,
            ),
            central_base_url: get("CENTRAL_BASE_URL").filter(|v| !v.is_empty()),
            delivery_base_url: get("DELIVERY_BASE_URL").filter(|v| !v.is_empty()),
            ledger_path: get("PROCESSED_ORDERS_CSV")
                .filter(|v| !v.is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH), PathBuf::from),
            snapshot_path: get("ORDERS_SNAPSHOT")
                .filter(|v| !v.is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH), PathBuf::from),
            http_timeout,
        })
    }

    /// Adapter configuration derived from this run configuration.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::new(self.client.clone()).with_timeout(self.http_timeout);
        if let Some(url) = &self.central_base_url {
            config = config.with_central_base_url(url.clone());
        }
        if let Some(url) = &self.delivery_base_url {
            config = config.with_delivery_base_url(url.clone());
        }
        config
    }

    /// Login credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }
}

/// Split the comma-separated store list, trimming entries.
fn parse_store_ids(raw: &str) -> Result<Vec<StoreId>, ConfigError> {
    let ids: Vec<StoreId> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(StoreId::new)
        .collect();

    if ids.is_empty() {
        return Err(ConfigError::Invalid {
            name: "STORE_IDS",
            message: "no store identifiers given".to_string(),
        });
    }
    Ok(ids)
}
