use std::any::Any;
use std::time::Instant;
use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;
use crate::error::AppError;

pub const REQUEST_ID_HEADER: &str = "request-id";
pub const RESPONSE_TIME_HEADER: &str = "response-time";

/// Tags every response with a fresh request id and the time spent handling it.
pub async fn gatekeeper(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let mut response = next.run(req).await;

    let elapsed = started.elapsed();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{:.4}s", elapsed.as_secs_f64())) {
        headers.insert(RESPONSE_TIME_HEADER, value);
    }

    if response.status().is_server_error() {
        tracing::error!(%request_id, %method, %path, status = %response.status(), "Request failed");
    } else {
        tracing::debug!(%request_id, %method, %path, status = %response.status(), "Request handled");
    }

    response
}

/// Turns a handler panic into the generic 500 envelope instead of a dropped connection.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::InternalServerError(format!("Unhandled panic: {}", detail)).into_response()
}
