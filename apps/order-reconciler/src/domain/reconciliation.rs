//! Reconciliation of fetched orders against the processed-order ledger.

use std::collections::HashSet;

use crate::domain::order::OrderRecord;

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationReport {
    /// Fetched orders whose id is absent from the reference set.
    pub missing_orders: Vec<OrderRecord>,
    /// Number of orders fetched from the platform.
    pub total_fetched: usize,
    /// Number of missing orders.
    pub missing_count: usize,
    /// Missing orders as a percentage of the total, 0 when nothing was fetched.
    pub miss_rate: f64,
}

impl ReconciliationReport {
    /// The all-zero report, used when the reference ledger is unavailable.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            missing_orders: Vec::new(),
            total_fetched: 0,
            missing_count: 0,
            miss_rate: 0.0,
        }
    }

    /// Ids of the missing orders, for logging.
    #[must_use]
    pub fn missing_ids(&self) -> Vec<&str> {
        self.missing_orders.iter().map(|o| o.id.as_str()).collect()
    }

    /// Whether every fetched order was found in the reference set.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing_count == 0
    }
}

/// Compute the set difference between fetched orders and the reference set
/// of already-processed order ids.
#[must_use]
pub fn reconcile(fetched: Vec<OrderRecord>, processed_ids: &HashSet<String>) -> ReconciliationReport {
    let total_fetched = fetched.len();
    let missing_orders: Vec<OrderRecord> = fetched
        .into_iter()
        .filter(|order| !processed_ids.contains(&order.id))
        .collect();
    let missing_count = missing_orders.len();
    let miss_rate = if total_fetched > 0 {
        (missing_count as f64 / total_fetched as f64) * 100.0
    } else {
        0.0
    };

    ReconciliationReport {
        missing_orders,
        total_fetched,
        missing_count,
        miss_rate,
    }
}
