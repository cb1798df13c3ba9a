use std::sync::Arc;
use std::time::Duration;
use boxoffice_shared::{Booking, MetricsSnapshot};
use boxoffice_store::InventoryGuard;
use uuid::Uuid;
use crate::booking::{BookingConfirmer, Confirmation};
use crate::clock::{Clock, SystemClock};
use crate::events::{EventAvailability, EventCatalog, EventCreated};
use crate::expiry::ExpiryWorker;
use crate::holds::{HoldReceipt, HoldService, HoldView};
use crate::{internal, InventoryResult};

/// Entry point for callers: every service here shares one [`InventoryGuard`] and clock.
#[derive(Clone)]
pub struct BoxOffice {
    guard: InventoryGuard,
    clock: Arc<dyn Clock>,
    catalog: EventCatalog,
    holds: HoldService,
    bookings: BookingConfirmer,
}

impl BoxOffice {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let guard = InventoryGuard::new();
        Self {
            catalog: EventCatalog::new(guard.clone(), clock.clone()),
            holds: HoldService::new(guard.clone(), clock.clone()),
            bookings: BookingConfirmer::new(guard.clone(), clock.clone()),
            guard,
            clock,
        }
    }

    pub async fn create_event(&self, name: impl Into<String>, total_seats: u32) -> InventoryResult<EventCreated> {
        self.catalog.create_event(name, total_seats).await
    }

    pub async fn get_event(&self, event_id: Uuid) -> InventoryResult<EventAvailability> {
        self.catalog.get_event(event_id).await
    }

    pub async fn create_hold(&self, event_id: Uuid, quantity: u32, ttl: Duration) -> InventoryResult<HoldReceipt> {
        self.holds.create_hold(event_id, quantity, ttl).await
    }

    pub async fn get_hold(&self, hold_id: Uuid) -> InventoryResult<HoldView> {
        self.holds.get_hold(hold_id).await
    }

    pub async fn confirm_booking(&self, hold_id: Uuid, payment_token: &str) -> InventoryResult<Confirmation> {
        self.bookings.confirm(hold_id, payment_token).await
    }

    pub async fn get_booking(&self, booking_id: Uuid) -> InventoryResult<Booking> {
        self.bookings.get_booking(booking_id).await
    }

    pub async fn metrics(&self) -> MetricsSnapshot {
        self.guard.inspect(|state| state.metrics()).await
    }

    /// Runs one expiry pass immediately, outside the worker's schedule.
    pub async fn sweep_expired(&self) -> Vec<Uuid> {
        self.expiry_worker(Duration::from_secs(1)).sweep().await
    }

    pub fn expiry_worker(&self, interval: Duration) -> ExpiryWorker {
        ExpiryWorker::new(self.guard.clone(), self.clock.clone(), interval)
    }

    pub async fn check_invariants(&self) -> InventoryResult<()> {
        self.guard
            .inspect(|state| state.check_invariants())
            .await
            .map_err(|err| internal("check_invariants", err))
    }
}

impl Default for BoxOffice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_shared::HoldStatus;
    use crate::clock::ManualClock;
    use crate::InventoryError;

    fn box_office() -> (BoxOffice, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (BoxOffice::with_clock(clock.clone()), clock)
    }

    async fn seats(office: &BoxOffice, event_id: Uuid) -> (u32, u32, u32) {
        let event = office.get_event(event_id).await.unwrap();
        assert_eq!(event.available + event.held + event.booked, event.total_seats);
        (event.available, event.held, event.booked)
    }

    #[tokio::test]
    async fn test_concert_hold_and_idempotent_booking() {
        let (office, _) = box_office();
        let event = office.create_event("Concert", 10).await.unwrap();
        assert_eq!(seats(&office, event.event_id).await, (10, 0, 0));

        let hold = office
            .create_hold(event.event_id, 4, Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(seats(&office, event.event_id).await, (6, 4, 0));

        let first = office.confirm_booking(hold.hold_id, &hold.payment_token).await.unwrap();
        assert_eq!(seats(&office, event.event_id).await, (6, 0, 4));

        let second = office.confirm_booking(hold.hold_id, &hold.payment_token).await.unwrap();
        assert_eq!(second.booking_id, first.booking_id);
        assert_eq!(seats(&office, event.event_id).await, (6, 0, 4));

        let metrics = office.metrics().await;
        assert_eq!(metrics.total_events, 1);
        assert_eq!(metrics.bookings, 1);
        assert_eq!(metrics.active_holds, 0);
        office.check_invariants().await.unwrap();
    }

    #[tokio::test]
    async fn test_swept_hold_releases_seats_and_cannot_be_booked() {
        let (office, clock) = box_office();
        let event = office.create_event("Concert", 10).await.unwrap();
        let hold = office
            .create_hold(event.event_id, 3, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(seats(&office, event.event_id).await, (7, 3, 0));

        clock.advance(chrono::Duration::seconds(2));
        let expired = office.sweep_expired().await;

        assert_eq!(expired, vec![hold.hold_id]);
        assert_eq!(seats(&office, event.event_id).await, (10, 0, 0));
        assert_eq!(office.get_hold(hold.hold_id).await.unwrap().status, HoldStatus::Expired);

        let err = office.confirm_booking(hold.hold_id, &hold.payment_token).await.unwrap_err();
        assert!(matches!(err, InventoryError::Expired));

        let metrics = office.metrics().await;
        assert_eq!(metrics.expired_holds, 1);
        assert_eq!(metrics.active_holds, 0);
        office.check_invariants().await.unwrap();
    }

    #[tokio::test]
    async fn test_racing_holds_on_shared_capacity() {
        let (office, _) = box_office();
        let event_id = office.create_event("Concert", 10).await.unwrap().event_id;

        let a = {
            let office = office.clone();
            tokio::spawn(async move { office.create_hold(event_id, 6, Duration::from_secs(60)).await })
        };
        let b = {
            let office = office.clone();
            tokio::spawn(async move { office.create_hold(event_id, 6, Duration::from_secs(60)).await })
        };
        let results = [a.await.unwrap(), b.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(InventoryError::InsufficientCapacity { .. }))));
        assert_eq!(seats(&office, event_id).await, (4, 6, 0));
    }

    #[tokio::test]
    async fn test_confirm_and_sweep_race_resolves_one_way() {
        let (office, clock) = box_office();
        let event = office.create_event("Concert", 10).await.unwrap();
        let hold = office
            .create_hold(event.event_id, 5, Duration::from_secs(1))
            .await
            .unwrap();
        clock.advance(chrono::Duration::seconds(2));

        let confirm = {
            let office = office.clone();
            let hold_id = hold.hold_id;
            let token = hold.payment_token.clone();
            tokio::spawn(async move { office.confirm_booking(hold_id, &token).await })
        };
        let sweep = {
            let office = office.clone();
            tokio::spawn(async move { office.sweep_expired().await })
        };

        assert!(matches!(confirm.await.unwrap(), Err(InventoryError::Expired)));
        sweep.await.unwrap();
        assert_eq!(office.get_hold(hold.hold_id).await.unwrap().status, HoldStatus::Expired);
        assert_eq!(seats(&office, event.event_id).await, (10, 0, 0));
        office.check_invariants().await.unwrap();
    }

    #[tokio::test]
    async fn test_metrics_track_entity_states_under_load() {
        let (office, clock) = box_office();
        let event_id = office.create_event("Festival", 100).await.unwrap().event_id;

        let mut tasks = Vec::new();
        for i in 0..20u32 {
            let office = office.clone();
            tasks.push(tokio::spawn(async move {
                let ttl = Duration::from_secs(if i % 2 == 0 { 1 } else { 600 });
                let hold = office.create_hold(event_id, 3, ttl).await?;
                if i % 4 == 1 {
                    office.confirm_booking(hold.hold_id, &hold.payment_token).await?;
                }
                Ok::<_, InventoryError>(())
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        clock.advance(chrono::Duration::seconds(5));
        office.sweep_expired().await;

        let metrics = office.metrics().await;
        assert_eq!(metrics.expired_holds, 10);
        assert_eq!(metrics.bookings, 5);
        assert_eq!(metrics.active_holds, 5);
        assert_eq!(seats(&office, event_id).await, (70, 15, 15));
        office.check_invariants().await.unwrap();
    }
}
