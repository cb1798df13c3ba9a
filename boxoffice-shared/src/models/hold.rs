use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::fmt;
use crate::pii::Masked;

/// Hold lifecycle. `Active` is the only non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HoldStatus {
    Active,
    Expired,
    Success,
}

impl HoldStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, HoldStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HoldStatus::Active => "active",
            HoldStatus::Expired => "expired",
            HoldStatus::Success => "success",
        }
    }
}

impl fmt::Display for HoldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time-limited reservation of seats pending payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hold {
    pub id: Uuid,
    pub event_id: Uuid,
    pub quantity: u32,
    pub expires_at: DateTime<Utc>,
    pub payment_token: Masked<String>,
    pub status: HoldStatus,
    pub created_at: DateTime<Utc>,
}

impl Hold {
    pub fn new(
        event_id: Uuid,
        quantity: u32,
        expires_at: DateTime<Utc>,
        payment_token: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            quantity,
            expires_at,
            payment_token: Masked(payment_token),
            status: HoldStatus::Active,
            created_at,
        }
    }

    /// The deadline instant itself counts as expired.
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Active and past its deadline, i.e. due for release.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == HoldStatus::Active && self.is_past_deadline(now)
    }

    pub fn token_matches(&self, candidate: &str) -> bool {
        self.payment_token.expose().as_str() == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn hold_expiring_at(expires_at: DateTime<Utc>) -> Hold {
        Hold::new(Uuid::new_v4(), 2, expires_at, "tok".to_string(), Utc::now())
    }

    #[test]
    fn test_overdue_only_while_active() {
        let now = Utc::now();
        let mut hold = hold_expiring_at(now - Duration::seconds(1));
        assert!(hold.is_overdue(now));

        hold.status = HoldStatus::Success;
        assert!(hold.is_past_deadline(now));
        assert!(!hold.is_overdue(now));
    }

    #[test]
    fn test_deadline_boundary_is_expired() {
        let now = Utc::now();
        let hold = hold_expiring_at(now);

        assert!(hold.is_past_deadline(now));
        assert!(!hold.is_past_deadline(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_token_is_masked_in_debug_output() {
        let hold = hold_expiring_at(Utc::now());
        let rendered = format!("{:?}", hold);

        assert!(hold.token_matches("tok"));
        assert!(!hold.token_matches("other"));
        assert!(!rendered.contains("\"tok\""));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&HoldStatus::Expired).unwrap();
        assert_eq!(json, "\"expired\"");
        assert!(HoldStatus::Success.is_terminal());
        assert!(!HoldStatus::Active.is_terminal());
    }
}
