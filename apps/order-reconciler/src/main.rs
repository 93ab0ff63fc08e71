//! Order Reconciler Binary
//!
//! Runs one reconciliation pass and exits.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p order-reconciler
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `CENTRAL_CLIENT`: client slug embedded in Central URLs
//! - `CENTRAL_USERNAME`: platform username
//! - `CENTRAL_PASSWORD`: platform password
//! - `STORE_IDS`: comma-separated store identifiers
//! - `ORDERS_START_TIME`: window start, passed through verbatim
//! - `ORDERS_END_TIME`: window end, passed through verbatim
//!
//! ## Optional
//! - `CENTRAL_BASE_URL` / `DELIVERY_BASE_URL`: API base URL overrides
//! - `PROCESSED_ORDERS_CSV`: ledger path (default: ./processed_orders.csv)
//! - `ORDERS_SNAPSHOT`: snapshot path (default: ./orders.json)
//! - `HTTP_TIMEOUT_SECS`: request timeout (default: 30)
//! - `RECONCILER_LOG`: append log lines to this file instead of stdout
//! - `RUST_LOG`: log level (default: info)

use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use order_reconciler::infrastructure::api::CentralApiAdapter;
use order_reconciler::{pipeline, progress, RunConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is a dev convenience; absence is not an error.
    let _ = dotenvy::dotenv();

    init_tracing().context("failed to initialize logging")?;

    let config = RunConfig::from_env().context("failed to load configuration")?;
    let api = Arc::new(CentralApiAdapter::new(config.api_config())?);

    let cancel = CancellationToken::new();
    let ticker = progress::spawn_ticker(cancel.clone());

    let result = pipeline::run(&config, api).await;

    // The ticker is cancelled whatever the pipeline did.
    cancel.cancel();
    let _ = ticker.await;

    match result {
        Ok(report) => {
            tracing::info!(
                client = %config.client,
                missing = report.missing_count,
                "Reconciliation run completed"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Reconciliation run aborted");
            Err(e.into())
        }
    }
}

/// Initialize the tracing subscriber.
///
/// Logs go to stdout, or append to the file named by `RECONCILER_LOG` when
/// set (ANSI disabled so the file stays grep-friendly).
fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match std::env::var("RECONCILER_LOG") {
        Ok(path) if !path.is_empty() => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {path}"))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}
