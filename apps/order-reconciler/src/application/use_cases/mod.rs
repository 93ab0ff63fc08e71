//! Application use cases.

pub mod fetch_orders;
pub mod reconcile;

pub use fetch_orders::FetchOrdersUseCase;
pub use reconcile::ReconcileUseCase;
