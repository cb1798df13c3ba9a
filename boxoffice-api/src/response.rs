use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body shape shared by every endpoint, success or failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub detail: String,
    pub data: T,
}

pub fn success<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        detail: String::new(),
        data,
    })
}

pub fn message(detail: impl Into<String>) -> Json<Envelope<serde_json::Value>> {
    Json(Envelope {
        detail: detail.into(),
        data: serde_json::json!({}),
    })
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
