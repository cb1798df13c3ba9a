use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use boxoffice_core::InventoryError;
use uuid::Uuid;
use crate::response::message;

pub const GENERIC_FAILURE: &str = "Something has failed. please contact support team";

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::ValidationError(msg) => {
                tracing::info!("Request rejected: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };

        (status, message(detail)).into_response()
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotFound { kind, .. } => AppError::NotFoundError(format!("{} not found", kind)),
            InventoryError::InsufficientCapacity { .. } => {
                AppError::ValidationError("Not enough seats available".to_string())
            }
            InventoryError::InvalidToken => AppError::ValidationError("Invalid payment token".to_string()),
            InventoryError::Expired => AppError::ValidationError("Hold expired".to_string()),
            InventoryError::InvalidQuantity | InventoryError::InvalidTtl => {
                AppError::ValidationError(err.to_string())
            }
            InventoryError::Internal(inner) => AppError::InternalServerError(inner.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

/// Ids arrive as free text; anything that is not a UUID cannot name a record.
pub fn parse_id(raw: &str, kind: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFoundError(format!("{} not found", kind)))
}
