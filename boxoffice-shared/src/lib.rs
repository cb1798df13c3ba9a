pub mod models;
pub mod pii;

pub use models::{Booking, Event, Hold, HoldStatus, MetricsSnapshot};
pub use pii::Masked;
