use std::sync::Arc;
use std::time::Duration;
use boxoffice_shared::{Hold, HoldStatus};
use boxoffice_store::InventoryGuard;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use crate::clock::Clock;
use crate::token::generate_payment_token;
use crate::{internal, InventoryError, InventoryResult};

/// What the client needs to later confirm the hold.
#[derive(Debug, Clone, Serialize)]
pub struct HoldReceipt {
    pub hold_id: Uuid,
    pub event_id: Uuid,
    pub quantity: u32,
    pub payment_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Audit view of a hold. Never carries the payment token.
#[derive(Debug, Clone, Serialize)]
pub struct HoldView {
    pub hold_id: Uuid,
    pub event_id: Uuid,
    pub quantity: u32,
    pub status: HoldStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&Hold> for HoldView {
    fn from(hold: &Hold) -> Self {
        Self {
            hold_id: hold.id,
            event_id: hold.event_id,
            quantity: hold.quantity,
            status: hold.status,
            expires_at: hold.expires_at,
            created_at: hold.created_at,
        }
    }
}

#[derive(Clone)]
pub struct HoldService {
    guard: InventoryGuard,
    clock: Arc<dyn Clock>,
}

impl HoldService {
    pub fn new(guard: InventoryGuard, clock: Arc<dyn Clock>) -> Self {
        Self { guard, clock }
    }

    /// Places a hold of `quantity` seats lasting `ttl`.
    ///
    /// Within one write section the event's overdue holds are expired first and
    /// only then is capacity checked, so seats freed by stale holds count for
    /// this request and cannot be handed out twice.
    pub async fn create_hold(&self, event_id: Uuid, quantity: u32, ttl: Duration) -> InventoryResult<HoldReceipt> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }
        let ttl = chrono::Duration::from_std(ttl)
            .ok()
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or(InventoryError::InvalidTtl)?;
        let payment_token = generate_payment_token();

        let (receipt, reclaimed) = self
            .guard
            .transact(|state| -> InventoryResult<(HoldReceipt, usize)> {
                let now = self.clock.now();
                let expires_at = now.checked_add_signed(ttl).ok_or(InventoryError::InvalidTtl)?;

                if state.event(&event_id).is_none() {
                    return Err(InventoryError::event_not_found(event_id));
                }

                let reclaimed = state
                    .reconcile_event(event_id, now)
                    .map_err(|err| internal("create_hold", err))?;

                let available = state
                    .event(&event_id)
                    .map(|event| event.available)
                    .ok_or_else(|| InventoryError::event_not_found(event_id))?;
                if quantity > available {
                    return Err(InventoryError::InsufficientCapacity {
                        requested: quantity,
                        available,
                    });
                }

                let hold = state
                    .place_hold(event_id, quantity, expires_at, payment_token, now)
                    .map_err(|err| internal("create_hold", err))?;

                let receipt = HoldReceipt {
                    hold_id: hold.id,
                    event_id,
                    quantity,
                    payment_token: hold.payment_token.expose().clone(),
                    expires_at: hold.expires_at,
                };
                Ok((receipt, reclaimed.len()))
            })
            .await?;

        info!(
            %event_id,
            hold_id = %receipt.hold_id,
            quantity,
            reclaimed,
            "Hold created"
        );
        Ok(receipt)
    }

    pub async fn get_hold(&self, hold_id: Uuid) -> InventoryResult<HoldView> {
        self.guard
            .inspect(|state| state.hold(&hold_id).map(HoldView::from))
            .await
            .ok_or_else(|| InventoryError::hold_not_found(hold_id))
    }
}
