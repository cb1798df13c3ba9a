use axum::{extract::State, routing::get, Json, Router};
use boxoffice_shared::MetricsSnapshot;
use crate::response::{message, success, Envelope};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
}

async fn home() -> Json<Envelope<serde_json::Value>> {
    message("Hello!")
}

async fn health() -> Json<Envelope<serde_json::Value>> {
    message("")
}

/// GET /metrics
async fn metrics(State(state): State<AppState>) -> Json<Envelope<MetricsSnapshot>> {
    success(state.box_office.metrics().await)
}
