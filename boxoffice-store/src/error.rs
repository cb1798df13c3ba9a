use uuid::Uuid;

/// Conditions that mean the in-memory inventory no longer satisfies its own invariants.
///
/// Callers validate requests before mutating, so none of these should surface
/// during normal operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Event {0} referenced by inventory is missing")]
    EventMissing(Uuid),

    #[error("Hold not found: {0}")]
    HoldMissing(Uuid),

    #[error("Hold {hold_id} is {status}, expected active")]
    HoldNotActive {
        hold_id: Uuid,
        status: String,
    },

    #[error("Hold {0} already has a booking")]
    AlreadyBooked(Uuid),

    #[error("Seat counter {field} of event {event_id} would underflow: {current} - {by}")]
    CounterUnderflow {
        event_id: Uuid,
        field: &'static str,
        current: u32,
        by: u32,
    },

    #[error("Event {0} seat counters disagree with its capacity, holds or bookings")]
    Unbalanced(Uuid),

    #[error("Metric {metric} drifted: counter {recorded}, entities {actual}")]
    MetricsDrift {
        metric: &'static str,
        recorded: u64,
        actual: u64,
    },
}
