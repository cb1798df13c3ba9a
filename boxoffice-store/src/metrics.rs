use boxoffice_shared::MetricsSnapshot;
use crate::error::StoreError;

/// Running counters kept alongside the inventory maps.
///
/// Only `InventoryState` bumps these, inside the same write section that
/// changes the entities they count.
#[derive(Debug, Default)]
pub struct MetricsCounter {
    total_events: u64,
    active_holds: u64,
    bookings: u64,
    expired_holds: u64,
}

impl MetricsCounter {
    pub(crate) fn record_event_created(&mut self) {
        self.total_events += 1;
    }

    pub(crate) fn record_hold_placed(&mut self) {
        self.active_holds += 1;
    }

    pub(crate) fn record_hold_expired(&mut self) -> Result<(), StoreError> {
        self.active_holds = self.release_active()?;
        self.expired_holds += 1;
        Ok(())
    }

    pub(crate) fn record_booking(&mut self) -> Result<(), StoreError> {
        self.active_holds = self.release_active()?;
        self.bookings += 1;
        Ok(())
    }

    /// Active count after one hold leaves the active state.
    ///
    /// The leaving hold is itself active, so a zero count has drifted from the entities.
    fn release_active(&self) -> Result<u64, StoreError> {
        self.active_holds.checked_sub(1).ok_or(StoreError::MetricsDrift {
            metric: "active_holds",
            recorded: self.active_holds,
            actual: 1,
        })
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_events: self.total_events,
            active_holds: self.active_holds,
            bookings: self.bookings,
            expired_holds: self.expired_holds,
        }
    }
}
