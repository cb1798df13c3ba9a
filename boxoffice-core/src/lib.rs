pub mod booking;
pub mod clock;
pub mod events;
pub mod expiry;
pub mod holds;
pub mod service;
pub mod token;

use boxoffice_store::StoreError;
use tracing::error;
use uuid::Uuid;

pub use booking::{BookingConfirmer, Confirmation};
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{EventAvailability, EventCatalog, EventCreated};
pub use expiry::{ExpiryHandle, ExpiryWorker};
pub use holds::{HoldReceipt, HoldService, HoldView};
pub use service::BoxOffice;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("{kind} not found: {id}")]
    NotFound {
        kind: &'static str,
        id: Uuid,
    },
    #[error("Not enough seats available: requested {requested}, available {available}")]
    InsufficientCapacity {
        requested: u32,
        available: u32,
    },
    #[error("Invalid payment token")]
    InvalidToken,
    #[error("Hold expired")]
    Expired,
    #[error("Quantity must be greater than zero")]
    InvalidQuantity,
    #[error("Hold TTL must be a positive duration")]
    InvalidTtl,
    #[error("Internal inventory failure: {0}")]
    Internal(#[from] StoreError),
}

impl InventoryError {
    pub fn event_not_found(id: Uuid) -> Self {
        Self::NotFound { kind: "Event", id }
    }

    pub fn hold_not_found(id: Uuid) -> Self {
        Self::NotFound { kind: "Hold", id }
    }

    pub fn booking_not_found(id: Uuid) -> Self {
        Self::NotFound { kind: "Booking", id }
    }

    /// Caller mistakes and business rejections, as opposed to broken state.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Logs a store invariant violation with the operation that hit it.
pub(crate) fn internal(operation: &'static str, err: StoreError) -> InventoryError {
    error!(operation, error = %err, "Inventory state corrupted");
    InventoryError::Internal(err)
}
