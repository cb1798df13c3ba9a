use std::sync::Arc;
use boxoffice_shared::Event;
use boxoffice_store::InventoryGuard;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use crate::clock::Clock;
use crate::{InventoryError, InventoryResult};

#[derive(Debug, Clone, Serialize)]
pub struct EventCreated {
    pub event_id: Uuid,
    pub name: String,
    pub total_seats: u32,
    pub created_at: DateTime<Utc>,
}

/// Seat buckets of one event, read under the guard.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct EventAvailability {
    pub event_id: Uuid,
    pub total_seats: u32,
    pub available: u32,
    pub held: u32,
    pub booked: u32,
}

impl From<&Event> for EventAvailability {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.id,
            total_seats: event.total_seats,
            available: event.available,
            held: event.held,
            booked: event.booked,
        }
    }
}

#[derive(Clone)]
pub struct EventCatalog {
    guard: InventoryGuard,
    clock: Arc<dyn Clock>,
}

impl EventCatalog {
    pub fn new(guard: InventoryGuard, clock: Arc<dyn Clock>) -> Self {
        Self { guard, clock }
    }

    pub async fn create_event(&self, name: impl Into<String>, total_seats: u32) -> InventoryResult<EventCreated> {
        if total_seats == 0 {
            return Err(InventoryError::InvalidQuantity);
        }

        let name = name.into();
        let created = self
            .guard
            .transact(|state| {
                let event = state.insert_event(name, total_seats, self.clock.now());
                EventCreated {
                    event_id: event.id,
                    name: event.name.clone(),
                    total_seats: event.total_seats,
                    created_at: event.created_at,
                }
            })
            .await;

        info!(event_id = %created.event_id, total_seats, "Event created");
        Ok(created)
    }

    pub async fn get_event(&self, event_id: Uuid) -> InventoryResult<EventAvailability> {
        self.guard
            .inspect(|state| state.event(&event_id).map(EventAvailability::from))
            .await
            .ok_or_else(|| InventoryError::event_not_found(event_id))
    }
}
