use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// A ticketed event with a fixed number of seats.
///
/// Every seat is in exactly one bucket at any time, so
/// `available + held + booked == total_seats` must always hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub total_seats: u32,
    pub available: u32,
    pub held: u32,
    pub booked: u32,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(name: String, total_seats: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            total_seats,
            available: total_seats,
            held: 0,
            booked: 0,
            created_at,
        }
    }

    /// True when the three seat buckets add up to the capacity.
    pub fn is_balanced(&self) -> bool {
        u64::from(self.available) + u64::from(self.held) + u64::from(self.booked)
            == u64::from(self.total_seats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_is_fully_available() {
        let event = Event::new("Concert".to_string(), 10, Utc::now());

        assert_eq!(event.available, 10);
        assert_eq!(event.held, 0);
        assert_eq!(event.booked, 0);
        assert!(event.is_balanced());
    }

    #[test]
    fn test_unbalanced_counters_detected() {
        let mut event = Event::new("Concert".to_string(), 10, Utc::now());
        event.held = 3;

        assert!(!event.is_balanced());
    }
}
