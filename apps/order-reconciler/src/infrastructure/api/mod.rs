//! HTTP adapter for the Central platform API.

pub mod adapter;
pub mod api_types;
pub mod config;
pub mod error;
pub mod http_client;

pub use adapter::CentralApiAdapter;
pub use config::ApiConfig;
pub use error::CentralError;
pub use http_client::ApiHttpClient;
