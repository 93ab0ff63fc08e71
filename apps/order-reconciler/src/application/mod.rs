//! Application layer: the remote-API port and the pipeline use cases.

pub mod ports;
pub mod use_cases;

pub use ports::{ApiError, CentralApiPort, Credentials, OrdersPage};
pub use use_cases::{FetchOrdersUseCase, ReconcileUseCase};
