//! Infrastructure layer: HTTP adapter, ledger input, snapshot output.

pub mod api;
pub mod ledger;
pub mod snapshot;

pub use api::{ApiConfig, CentralApiAdapter, CentralError};
pub use ledger::LedgerError;
pub use snapshot::SnapshotError;
