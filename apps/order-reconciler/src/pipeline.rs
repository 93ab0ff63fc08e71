//! One-shot reconciliation pipeline.
//!
//! login -> server token -> UUID resolution (parallel) -> order fetch
//! (parallel per store, paginated per store) -> snapshot -> reconciliation.
//! Stage failures abort the run with a typed error; per-store failures
//! inside a stage only shrink the result.

use std::sync::Arc;

use thiserror::Error;

use crate::application::ports::{ApiError, CentralApiPort};
use crate::application::{FetchOrdersUseCase, ReconcileUseCase};
use crate::config::RunConfig;
use crate::domain::ReconciliationReport;
use crate::infrastructure::snapshot;

/// Stage-level pipeline failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Login against the Central platform failed.
    #[error("login failed: {0}")]
    Login(ApiError),

    /// The delivery-platform server token could not be retrieved.
    #[error("server token retrieval failed: {0}")]
    ServerToken(ApiError),

    /// Not a single store resolved to a platform UUID.
    #[error("no store UUIDs could be resolved")]
    NoStoresResolved,

    /// The fetch stage produced no orders at all.
    #[error("no orders retrieved for the requested window")]
    NoOrders,
}

/// Run one full reconciliation pass.
pub async fn run<P>(config: &RunConfig, api: Arc<P>) -> Result<ReconciliationReport, PipelineError>
where
    P: CentralApiPort,
{
    tracing::info!(
        client = %config.client,
        stores = config.store_ids.len(),
        start = %config.window.start,
        end = %config.window.end,
        "Reconciliation run started"
    );

    let bearer = api
        .login(&config.credentials())
        .await
        .map_err(PipelineError::Login)?;

    let server_token = api
        .server_token(&bearer)
        .await
        .map_err(PipelineError::ServerToken)?;

    let fetch = FetchOrdersUseCase::new(Arc::clone(&api));

    let store_uuids = fetch.resolve_store_uuids(&bearer, &config.store_ids).await;
    if store_uuids.is_empty() {
        return Err(PipelineError::NoStoresResolved);
    }
    tracing::info!(
        resolved = store_uuids.len(),
        requested = config.store_ids.len(),
        "Store UUIDs resolved"
    );

    let orders = fetch
        .fetch_all(&server_token, &store_uuids, &config.window)
        .await;
    if orders.is_empty() {
        return Err(PipelineError::NoOrders);
    }
    tracing::info!(count = orders.len(), "Orders retrieved");

    // Debug artifact; a write failure never fails the run.
    if let Err(e) = snapshot::write_snapshot(&config.snapshot_path, &orders) {
        tracing::error!(error = %e, "Failed to write orders snapshot");
    }

    let report = ReconcileUseCase::new(config.ledger_path.clone()).execute(orders);
    log_summary(&report);
    Ok(report)
}

/// Log the reconciliation outcome.
fn log_summary(report: &ReconciliationReport) {
    if report.is_clean() {
        tracing::info!("No missing orders found");
    } else {
        tracing::info!(missing_ids = ?report.missing_ids(), "Missing orders detected");
    }
    tracing::info!(
        total = report.total_fetched,
        missing = report.missing_count,
        miss_rate = report.miss_rate,
        "Reconciliation summary"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{Credentials, OrdersPage};
    use crate::domain::{BearerToken, ServerToken, StoreId, StoreUuid, TimeWindow};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::time::Duration;

    /// Port whose stages fail from a chosen point onward.
    struct FailingFrom {
        stage: &'static str,
    }

    #[async_trait]
    impl CentralApiPort for FailingFrom {
        async fn login(&self, _credentials: &Credentials) -> Result<BearerToken, ApiError> {
            if self.stage == "login" {
                return Err(ApiError::MissingField { field: "token" });
            }
            Ok(BearerToken::new("bearer"))
        }

        async fn server_token(&self, _bearer: &BearerToken) -> Result<ServerToken, ApiError> {
            if self.stage == "server_token" {
                return Err(ApiError::Status {
                    status: 500,
                    body: String::new(),
                });
            }
            Ok(ServerToken::new("server"))
        }

        async fn store_uuid(
            &self,
            _bearer: &BearerToken,
            _store_id: &StoreId,
        ) -> Result<StoreUuid, ApiError> {
            Err(ApiError::MissingField {
                field: "data[0].uber_uuid",
            })
        }

        async fn orders_page(
            &self,
            _token: &ServerToken,
            _store_uuid: &StoreUuid,
            _window: &TimeWindow,
            _page_token: Option<&str>,
        ) -> Result<OrdersPage, ApiError> {
            Ok(OrdersPage {
                orders: vec![],
                raw_count: 0,
                next_page_token: None,
            })
        }
    }

    fn config() -> RunConfig {
        RunConfig {
            client: "acme".to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
            store_ids: vec![StoreId::new("store-1")],
            window: TimeWindow::new("2024-01-01T00:00:00Z", "2024-01-31T23:59:59Z"),
            central_base_url: None,
            delivery_base_url: None,
            ledger_path: PathBuf::from("/nonexistent/processed_orders.csv"),
            snapshot_path: PathBuf::from("/nonexistent/orders.json"),
            http_timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn login_failure_aborts_run() {
        let result = run(&config(), Arc::new(FailingFrom { stage: "login" })).await;
        assert!(matches!(result, Err(PipelineError::Login(_))));
    }

    #[tokio::test]
    async fn server_token_failure_aborts_run() {
        let result = run(&config(), Arc::new(FailingFrom { stage: "server_token" })).await;
        assert!(matches!(result, Err(PipelineError::ServerToken(_))));
    }

    #[tokio::test]
    async fn zero_resolved_stores_aborts_run() {
        let result = run(&config(), Arc::new(FailingFrom { stage: "uuid" })).await;
        assert!(matches!(result, Err(PipelineError::NoStoresResolved)));
    }
}
