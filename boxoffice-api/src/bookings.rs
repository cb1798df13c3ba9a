use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::error::{parse_id, AppError};
use crate::extract::AppJson;
use crate::response::{format_timestamp, success, Envelope};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub hold_id: String,
    pub payment_token: String,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BookingDetailResponse {
    pub booking_id: Uuid,
    pub event_id: Uuid,
    pub hold_id: Uuid,
    pub qty: u32,
    pub created_at: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book", post(confirm_booking))
        .route("/bookings/{booking_id}", get(get_booking))
}

/// POST /book
///
/// Safe to retry: a hold that is already booked answers with its original booking id.
async fn confirm_booking(
    State(state): State<AppState>,
    AppJson(req): AppJson<BookingRequest>,
) -> Result<Json<Envelope<BookingResponse>>, AppError> {
    let hold_id = parse_id(&req.hold_id, "Hold")?;
    let confirmation = state
        .box_office
        .confirm_booking(hold_id, &req.payment_token)
        .await?;

    Ok(success(BookingResponse {
        booking_id: confirmation.booking_id,
    }))
}

/// GET /bookings/{booking_id}
async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Envelope<BookingDetailResponse>>, AppError> {
    let booking_id = parse_id(&booking_id, "Booking")?;
    let booking = state.box_office.get_booking(booking_id).await?;

    Ok(success(BookingDetailResponse {
        booking_id: booking.id,
        event_id: booking.event_id,
        hold_id: booking.hold_id,
        qty: booking.quantity,
        created_at: format_timestamp(booking.created_at),
    }))
}
