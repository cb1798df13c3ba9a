use serde::{Deserialize, Serialize};

/// Point-in-time copy of the running inventory counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total_events: u64,
    pub active_holds: u64,
    pub bookings: u64,
    pub expired_holds: u64,
}
