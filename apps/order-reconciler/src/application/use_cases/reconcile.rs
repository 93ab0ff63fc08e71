//! Reconcile Use Case
//!
//! Diffs the fetched orders against the processed-order ledger and derives
//! the miss rate. An unavailable ledger produces the all-zero report rather
//! than an error: the run still completes and the condition is logged.

use std::path::PathBuf;

use crate::domain::{reconcile, OrderRecord, ReconciliationReport};
use crate::infrastructure::ledger::{self, LedgerError};

/// Use case for reconciling fetched orders against the reference ledger.
pub struct ReconcileUseCase {
    ledger_path: PathBuf,
}

impl ReconcileUseCase {
    /// Create a new ReconcileUseCase reading the ledger at `ledger_path`.
    pub fn new(ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger_path: ledger_path.into(),
        }
    }

    /// Execute the reconciliation pass over `fetched`.
    pub fn execute(&self, fetched: Vec<OrderRecord>) -> ReconciliationReport {
        let processed_ids = match ledger::load_processed_ids(&self.ledger_path) {
            Ok(ids) => ids,
            Err(e @ LedgerError::NotFound { .. }) => {
                tracing::warn!(error = %e, "Processed-order ledger unavailable, reporting zero");
                return ReconciliationReport::empty();
            }
            Err(e) => {
                tracing::error!(error = %e, "Processed-order ledger unreadable, reporting zero");
                return ReconciliationReport::empty();
            }
        };

        tracing::info!(
            reference_ids = processed_ids.len(),
            fetched = fetched.len(),
            "Reconciling fetched orders against ledger"
        );

        reconcile(fetched, &processed_ids)
    }
}
