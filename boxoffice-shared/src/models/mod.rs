pub mod booking;
pub mod event;
pub mod hold;
pub mod metrics;

pub use booking::Booking;
pub use event::Event;
pub use hold::{Hold, HoldStatus};
pub use metrics::MetricsSnapshot;
