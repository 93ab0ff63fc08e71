//! Core domain types: identifiers, order records, reconciliation math.

pub mod identifiers;
pub mod order;
pub mod reconciliation;

pub use identifiers::{BearerToken, ServerToken, StoreId, StoreUuid};
pub use order::{OrderRecord, TimeWindow};
pub use reconciliation::{reconcile, ReconciliationReport};
