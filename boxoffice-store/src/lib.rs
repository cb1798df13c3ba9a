pub mod app_config;
pub mod error;
pub mod guard;
pub mod metrics;
pub mod state;

pub use error::StoreError;
pub use guard::InventoryGuard;
pub use metrics::MetricsCounter;
pub use state::{InventoryState, Reconciliation};
