// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Reconciler - Library
//!
//! Reconciles orders retrieved from a delivery-platform API against the
//! locally maintained ledger of already-processed orders, surfacing orders
//! that were received upstream but never processed downstream.
//!
//! # Architecture
//!
//! - **Domain**: identifiers, order records, reconciliation math
//! - **Application**: the `CentralApiPort` driven port and the fetch /
//!   reconcile use cases
//! - **Infrastructure**: reqwest adapter for the Central platform API,
//!   CSV ledger input, JSON snapshot output
//!
//! One pass per invocation: login, token exchange, concurrent store-UUID
//! resolution, concurrent paginated order fetch, reconciliation, summary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - identifiers, order records, reconciliation.
pub mod domain;

/// Application layer - port definition and use cases.
pub mod application;

/// Infrastructure layer - HTTP adapter, ledger, snapshot.
pub mod infrastructure;

/// Run configuration parsed from the environment.
pub mod config;

/// The one-shot reconciliation pipeline.
pub mod pipeline;

/// Cosmetic terminal progress indicator.
pub mod progress;

// Re-exports for the binary and integration tests.
pub use application::ports::{ApiError, CentralApiPort, Credentials, OrdersPage};
pub use application::{FetchOrdersUseCase, ReconcileUseCase};
pub use config::{ConfigError, RunConfig};
pub use domain::{
    reconcile, BearerToken, OrderRecord, ReconciliationReport, ServerToken, StoreId, StoreUuid,
    TimeWindow,
};
pub use infrastructure::api::{ApiConfig, CentralApiAdapter, CentralError};
pub use pipeline::PipelineError;
