use std::time::Duration;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use boxoffice_shared::HoldStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::error::{parse_id, AppError};
use crate::extract::{AppJson, AppQuery};
use crate::response::{format_timestamp, success, Envelope};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HoldRequest {
    pub event_id: String,
    pub qty: u32,
}

#[derive(Debug, Deserialize)]
pub struct HoldParams {
    /// Minutes; falls back to the configured default.
    pub hold_ttl: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HoldResponse {
    pub hold_id: Uuid,
    pub expires_at: String,
    pub payment_token: String,
}

#[derive(Debug, Serialize)]
pub struct HoldStatusResponse {
    pub hold_id: Uuid,
    pub event_id: Uuid,
    pub qty: u32,
    pub status: HoldStatus,
    pub expires_at: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/holds", post(create_hold))
        .route("/holds/{hold_id}", get(get_hold))
}

/// POST /holds?hold_ttl=<minutes>
async fn create_hold(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HoldParams>,
    AppJson(req): AppJson<HoldRequest>,
) -> Result<Json<Envelope<HoldResponse>>, AppError> {
    let event_id = parse_id(&req.event_id, "Event")?;
    let ttl = match params.hold_ttl {
        Some(minutes) => Duration::from_secs(u64::from(minutes) * 60),
        None => state.rules.default_hold_ttl(),
    };

    let receipt = state.box_office.create_hold(event_id, req.qty, ttl).await?;

    Ok(success(HoldResponse {
        hold_id: receipt.hold_id,
        expires_at: format_timestamp(receipt.expires_at),
        payment_token: receipt.payment_token,
    }))
}

/// GET /holds/{hold_id}
async fn get_hold(
    State(state): State<AppState>,
    Path(hold_id): Path<String>,
) -> Result<Json<Envelope<HoldStatusResponse>>, AppError> {
    let hold_id = parse_id(&hold_id, "Hold")?;
    let hold = state.box_office.get_hold(hold_id).await?;

    Ok(success(HoldStatusResponse {
        hold_id: hold.hold_id,
        event_id: hold.event_id,
        qty: hold.quantity,
        status: hold.status,
        expires_at: format_timestamp(hold.expires_at),
    }))
}
