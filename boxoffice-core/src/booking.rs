use std::sync::Arc;
use boxoffice_shared::{Booking, HoldStatus};
use boxoffice_store::InventoryGuard;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use crate::clock::Clock;
use crate::{internal, InventoryError, InventoryResult};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Confirmation {
    pub booking_id: Uuid,
    /// True when the hold had already been confirmed and the original booking was returned.
    pub replayed: bool,
}

#[derive(Clone)]
pub struct BookingConfirmer {
    guard: InventoryGuard,
    clock: Arc<dyn Clock>,
}

impl BookingConfirmer {
    pub fn new(guard: InventoryGuard, clock: Arc<dyn Clock>) -> Self {
        Self { guard, clock }
    }

    /// Turns an active, unexpired hold into its booking.
    ///
    /// Retrying with the same credentials returns the booking created by the
    /// first call; counters move exactly once per hold. Expiry is judged against
    /// the clock here, not against whether the sweep has run yet.
    pub async fn confirm(&self, hold_id: Uuid, payment_token: &str) -> InventoryResult<Confirmation> {
        let outcome = self
            .guard
            .transact(|state| -> InventoryResult<Confirmation> {
                let now = self.clock.now();
                let hold = state
                    .hold(&hold_id)
                    .ok_or_else(|| InventoryError::hold_not_found(hold_id))?;

                if !hold.token_matches(payment_token) {
                    return Err(InventoryError::InvalidToken);
                }

                if let Some(booking) = state.booking_for_hold(&hold_id) {
                    return Ok(Confirmation {
                        booking_id: booking.id,
                        replayed: true,
                    });
                }

                if hold.status == HoldStatus::Expired || hold.is_past_deadline(now) {
                    return Err(InventoryError::Expired);
                }

                let booking = state
                    .commit_booking(hold_id, now)
                    .map_err(|err| internal("confirm_booking", err))?;
                Ok(Confirmation {
                    booking_id: booking.id,
                    replayed: false,
                })
            })
            .await;

        match &outcome {
            Ok(confirmation) if confirmation.replayed => {
                info!(%hold_id, booking_id = %confirmation.booking_id, "Booking already confirmed, returning original");
            }
            Ok(confirmation) => {
                info!(%hold_id, booking_id = %confirmation.booking_id, "Booking created");
            }
            Err(err) if err.is_client_error() => {
                warn!(%hold_id, error = %err, "Booking confirmation rejected");
            }
            Err(_) => {}
        }

        outcome
    }

    pub async fn get_booking(&self, booking_id: Uuid) -> InventoryResult<Booking> {
        self.guard
            .inspect(|state| state.booking(&booking_id).cloned())
            .await
            .ok_or_else(|| InventoryError::booking_not_found(booking_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::clock::ManualClock;
    use crate::events::EventCatalog;
    use crate::holds::{HoldReceipt, HoldService};

    struct Fixture {
        clock: Arc<ManualClock>,
        guard: InventoryGuard,
        confirmer: BookingConfirmer,
        event_id: Uuid,
        receipt: HoldReceipt,
    }

    async fn fixture_with_hold(total_seats: u32, quantity: u32, ttl: Duration) -> Fixture {
        let clock = Arc::new(ManualClock::default());
        let guard = InventoryGuard::new();
        let event_id = EventCatalog::new(guard.clone(), clock.clone())
            .create_event("Concert", total_seats)
            .await
            .unwrap()
            .event_id;
        let receipt = HoldService::new(guard.clone(), clock.clone())
            .create_hold(event_id, quantity, ttl)
            .await
            .unwrap();
        let confirmer = BookingConfirmer::new(guard.clone(), clock.clone());
        Fixture { clock, guard, confirmer, event_id, receipt }
    }

    async fn buckets(f: &Fixture) -> (u32, u32, u32) {
        f.guard
            .inspect(|state| {
                let event = state.event(&f.event_id).unwrap();
                (event.available, event.held, event.booked)
            })
            .await
    }

    #[tokio::test]
    async fn test_confirm_moves_held_to_booked() {
        let f = fixture_with_hold(10, 4, Duration::from_secs(60)).await;

        let confirmation = f
            .confirmer
            .confirm(f.receipt.hold_id, &f.receipt.payment_token)
            .await
            .unwrap();

        assert!(!confirmation.replayed);
        assert_eq!(buckets(&f).await, (6, 0, 4));

        let booking = f.confirmer.get_booking(confirmation.booking_id).await.unwrap();
        assert_eq!(booking.hold_id, f.receipt.hold_id);
        assert_eq!(booking.quantity, 4);
        f.guard.inspect(|state| state.check_invariants()).await.unwrap();
    }

    #[tokio::test]
    async fn test_retry_returns_same_booking() {
        let f = fixture_with_hold(10, 4, Duration::from_secs(60)).await;

        let first = f.confirmer.confirm(f.receipt.hold_id, &f.receipt.payment_token).await.unwrap();
        let second = f.confirmer.confirm(f.receipt.hold_id, &f.receipt.payment_token).await.unwrap();

        assert_eq!(first.booking_id, second.booking_id);
        assert!(second.replayed);
        assert_eq!(buckets(&f).await, (6, 0, 4));
        assert_eq!(f.guard.inspect(|state| state.metrics().bookings).await, 1);
    }

    #[tokio::test]
    async fn test_retry_after_deadline_still_returns_booking() {
        let f = fixture_with_hold(10, 4, Duration::from_secs(60)).await;
        let first = f.confirmer.confirm(f.receipt.hold_id, &f.receipt.payment_token).await.unwrap();

        f.clock.advance(chrono::Duration::minutes(5));
        let again = f.confirmer.confirm(f.receipt.hold_id, &f.receipt.payment_token).await.unwrap();

        assert_eq!(again.booking_id, first.booking_id);
    }

    #[tokio::test]
    async fn test_concurrent_confirmations_create_one_booking() {
        let f = fixture_with_hold(10, 4, Duration::from_secs(60)).await;

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let confirmer = f.confirmer.clone();
            let hold_id = f.receipt.hold_id;
            let token = f.receipt.payment_token.clone();
            tasks.push(tokio::spawn(async move { confirmer.confirm(hold_id, &token).await }));
        }

        let mut booking_ids = Vec::new();
        for task in tasks {
            booking_ids.push(task.await.unwrap().unwrap().booking_id);
        }

        booking_ids.dedup();
        assert_eq!(booking_ids.len(), 1);
        assert_eq!(buckets(&f).await, (6, 0, 4));
        assert_eq!(f.guard.inspect(|state| state.metrics().bookings).await, 1);
        f.guard.inspect(|state| state.check_invariants()).await.unwrap();
    }

    #[tokio::test]
    async fn test_wrong_token_rejected() {
        let f = fixture_with_hold(10, 4, Duration::from_secs(60)).await;

        let err = f.confirmer.confirm(f.receipt.hold_id, "not-the-token").await.unwrap_err();

        assert!(matches!(err, InventoryError::InvalidToken));
        assert_eq!(buckets(&f).await, (6, 4, 0));
    }

    #[tokio::test]
    async fn test_overdue_hold_rejected_before_sweep() {
        let f = fixture_with_hold(10, 3, Duration::from_secs(1)).await;

        f.clock.advance(chrono::Duration::seconds(2));
        let err = f
            .confirmer
            .confirm(f.receipt.hold_id, &f.receipt.payment_token)
            .await
            .unwrap_err();

        assert!(matches!(err, InventoryError::Expired));
        assert_eq!(buckets(&f).await, (7, 3, 0));
        assert!(f.guard.inspect(|state| state.booking_for_hold(&f.receipt.hold_id).is_none()).await);
    }

    #[tokio::test]
    async fn test_unknown_hold_not_found() {
        let f = fixture_with_hold(10, 3, Duration::from_secs(60)).await;
        let err = f.confirmer.confirm(Uuid::new_v4(), "token").await.unwrap_err();
        assert!(matches!(err, InventoryError::NotFound { kind: "Hold", .. }));
    }
}
