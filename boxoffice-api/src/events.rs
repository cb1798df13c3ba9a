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
pub struct CreateEventRequest {
    pub name: String,
    pub total_seats: u32,
}

#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    pub event_id: Uuid,
    pub total_seats: u32,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub total: u32,
    pub available: u32,
    pub held: u32,
    pub booked: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/{event_id}", get(get_event))
}

/// POST /events
async fn create_event(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateEventRequest>,
) -> Result<Json<Envelope<CreateEventResponse>>, AppError> {
    let created = state.box_office.create_event(req.name, req.total_seats).await?;

    Ok(success(CreateEventResponse {
        event_id: created.event_id,
        total_seats: created.total_seats,
        created_at: format_timestamp(created.created_at),
    }))
}

/// GET /events/{event_id}
async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Envelope<EventResponse>>, AppError> {
    let event_id = parse_id(&event_id, "Event")?;
    let event = state.box_office.get_event(event_id).await?;

    Ok(success(EventResponse {
        total: event.total_seats,
        available: event.available,
        held: event.held,
        booked: event.booked,
    }))
}
