use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Permanent consumption of the seats of one confirmed hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub event_id: Uuid,
    pub hold_id: Uuid,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(event_id: Uuid, hold_id: Uuid, quantity: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            hold_id,
            quantity,
            created_at,
        }
    }
}
