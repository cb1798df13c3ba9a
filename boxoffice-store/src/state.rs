use std::collections::HashMap;
use boxoffice_shared::{Booking, Event, Hold, HoldStatus, MetricsSnapshot};
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;
use crate::error::StoreError;
use crate::metrics::MetricsCounter;

/// Outcome of a store-wide expiry pass.
///
/// Each hold is released on its own, so a corrupted hold is reported in
/// `failed` without undoing the releases that did apply.
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub expired: Vec<Uuid>,
    pub failed: Vec<(Uuid, StoreError)>,
}

/// Authoritative in-memory inventory: events, holds, bookings and their counters.
///
/// There is no public constructor. The only way to reach a `&mut InventoryState`
/// is through [`crate::InventoryGuard::transact`], so every mutator below runs
/// inside the guard's write section.
#[derive(Debug)]
pub struct InventoryState {
    events: HashMap<Uuid, Event>,
    holds: HashMap<Uuid, Hold>,
    bookings: HashMap<Uuid, Booking>,
    bookings_by_hold: HashMap<Uuid, Uuid>,
    holds_by_event: HashMap<Uuid, Vec<Uuid>>,
    metrics: MetricsCounter,
}

impl InventoryState {
    pub(crate) fn new() -> Self {
        Self {
            events: HashMap::new(),
            holds: HashMap::new(),
            bookings: HashMap::new(),
            bookings_by_hold: HashMap::new(),
            holds_by_event: HashMap::new(),
            metrics: MetricsCounter::default(),
        }
    }

    pub fn event(&self, event_id: &Uuid) -> Option<&Event> {
        self.events.get(event_id)
    }

    pub fn hold(&self, hold_id: &Uuid) -> Option<&Hold> {
        self.holds.get(hold_id)
    }

    pub fn booking(&self, booking_id: &Uuid) -> Option<&Booking> {
        self.bookings.get(booking_id)
    }

    /// The single booking ever created for `hold_id`, if it was confirmed.
    pub fn booking_for_hold(&self, hold_id: &Uuid) -> Option<&Booking> {
        self.bookings_by_hold
            .get(hold_id)
            .and_then(|booking_id| self.bookings.get(booking_id))
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    pub fn holds(&self) -> impl Iterator<Item = &Hold> {
        self.holds.values()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn insert_event(&mut self, name: String, total_seats: u32, now: DateTime<Utc>) -> &Event {
        let event = Event::new(name, total_seats, now);
        let event_id = event.id;
        self.metrics.record_event_created();
        self.events.entry(event_id).or_insert(event)
    }

    /// Moves `quantity` seats from available to held and records an active hold.
    ///
    /// Callers check capacity first; a shortfall here means the counters are corrupt.
    pub fn place_hold(
        &mut self,
        event_id: Uuid,
        quantity: u32,
        expires_at: DateTime<Utc>,
        payment_token: String,
        now: DateTime<Utc>,
    ) -> Result<&Hold, StoreError> {
        let event = self
            .events
            .get_mut(&event_id)
            .ok_or(StoreError::EventMissing(event_id))?;

        event.available = checked_sub(event_id, "available", event.available, quantity)?;
        event.held += quantity;

        let hold = Hold::new(event_id, quantity, expires_at, payment_token, now);
        let hold_id = hold.id;
        self.holds_by_event.entry(event_id).or_default().push(hold_id);
        self.metrics.record_hold_placed();

        Ok(self.holds.entry(hold_id).or_insert(hold))
    }

    /// Expires every overdue active hold of one event and returns their ids.
    ///
    /// Stops at the first corrupted hold; releases applied before it stay applied.
    pub fn reconcile_event(
        &mut self,
        event_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, StoreError> {
        let overdue: Vec<Uuid> = self
            .holds_by_event
            .get(&event_id)
            .map(|hold_ids| {
                hold_ids
                    .iter()
                    .filter(|hold_id| {
                        self.holds
                            .get(hold_id)
                            .is_some_and(|hold| hold.is_overdue(now))
                    })
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        let mut released = Vec::with_capacity(overdue.len());
        for hold_id in overdue {
            self.expire_hold(hold_id)?;
            released.push(hold_id);
        }

        if !released.is_empty() {
            debug!(%event_id, count = released.len(), "Reclaimed seats from overdue holds");
        }

        Ok(released)
    }

    /// Expires every overdue active hold across all events.
    pub fn expire_overdue(&mut self, now: DateTime<Utc>) -> Reconciliation {
        let overdue: Vec<Uuid> = self
            .holds
            .values()
            .filter(|hold| hold.is_overdue(now))
            .map(|hold| hold.id)
            .collect();

        let mut outcome = Reconciliation::default();
        for hold_id in overdue {
            match self.expire_hold(hold_id) {
                Ok(_) => outcome.expired.push(hold_id),
                Err(err) => outcome.failed.push((hold_id, err)),
            }
        }
        outcome
    }

    /// Converts an active hold into its booking, moving seats from held to booked.
    pub fn commit_booking(&mut self, hold_id: Uuid, now: DateTime<Utc>) -> Result<&Booking, StoreError> {
        if self.bookings_by_hold.contains_key(&hold_id) {
            return Err(StoreError::AlreadyBooked(hold_id));
        }

        let hold = self
            .holds
            .get_mut(&hold_id)
            .ok_or(StoreError::HoldMissing(hold_id))?;
        if hold.status.is_terminal() {
            return Err(StoreError::HoldNotActive {
                hold_id,
                status: hold.status.to_string(),
            });
        }

        let event = self
            .events
            .get_mut(&hold.event_id)
            .ok_or(StoreError::EventMissing(hold.event_id))?;
        let held = checked_sub(event.id, "held", event.held, hold.quantity)?;
        self.metrics.record_booking()?;
        event.held = held;
        event.booked += hold.quantity;
        hold.status = HoldStatus::Success;

        let booking = Booking::new(hold.event_id, hold_id, hold.quantity, now);
        let booking_id = booking.id;
        self.bookings_by_hold.insert(hold_id, booking_id);

        Ok(self.bookings.entry(booking_id).or_insert(booking))
    }

    /// Cross-checks every event's buckets against its holds and bookings, and
    /// the running counters against the entity maps.
    pub fn check_invariants(&self) -> Result<(), StoreError> {
        for event in self.events.values() {
            let held: u64 = self
                .holds
                .values()
                .filter(|hold| hold.event_id == event.id && hold.status == HoldStatus::Active)
                .map(|hold| u64::from(hold.quantity))
                .sum();
            let booked: u64 = self
                .bookings
                .values()
                .filter(|booking| booking.event_id == event.id)
                .map(|booking| u64::from(booking.quantity))
                .sum();

            if !event.is_balanced() || held != u64::from(event.held) || booked != u64::from(event.booked) {
                return Err(StoreError::Unbalanced(event.id));
            }
        }

        let snapshot = self.metrics.snapshot();
        let count_status = |status: HoldStatus| {
            self.holds.values().filter(|hold| hold.status == status).count() as u64
        };
        let checks = [
            ("total_events", snapshot.total_events, self.events.len() as u64),
            ("active_holds", snapshot.active_holds, count_status(HoldStatus::Active)),
            ("expired_holds", snapshot.expired_holds, count_status(HoldStatus::Expired)),
            ("bookings", snapshot.bookings, self.bookings.len() as u64),
        ];
        for (metric, recorded, actual) in checks {
            if recorded != actual {
                return Err(StoreError::MetricsDrift { metric, recorded, actual });
            }
        }

        Ok(())
    }

    /// Status flip and counter update for one hold, applied together or not at all.
    fn expire_hold(&mut self, hold_id: Uuid) -> Result<u32, StoreError> {
        let hold = self
            .holds
            .get_mut(&hold_id)
            .ok_or(StoreError::HoldMissing(hold_id))?;
        if hold.status.is_terminal() {
            return Err(StoreError::HoldNotActive {
                hold_id,
                status: hold.status.to_string(),
            });
        }

        let event = self
            .events
            .get_mut(&hold.event_id)
            .ok_or(StoreError::EventMissing(hold.event_id))?;
        let held = checked_sub(event.id, "held", event.held, hold.quantity)?;
        self.metrics.record_hold_expired()?;
        event.held = held;
        event.available += hold.quantity;
        hold.status = HoldStatus::Expired;

        Ok(hold.quantity)
    }
}

fn checked_sub(event_id: Uuid, field: &'static str, current: u32, by: u32) -> Result<u32, StoreError> {
    current.checked_sub(by).ok_or(StoreError::CounterUnderflow {
        event_id,
        field,
        current,
        by,
    })
}
