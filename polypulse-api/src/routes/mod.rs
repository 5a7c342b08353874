//! API route definitions

mod events;
mod health;
mod ingest;
mod tags;

use axum::{http::StatusCode, Json};
use polypulse_core::PulseError;
use serde::Serialize;

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> axum::Router<AppState> {
    axum::Router::new()
        .merge(events::routes())
        .merge(health::routes())
        .merge(ingest::routes())
        .merge(tags::routes())
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a pipeline error onto an HTTP status
pub fn error_response(err: PulseError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        PulseError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// 404 with a JSON body
pub fn not_found(msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    error_response(PulseError::not_found(msg))
}

/// 400 with a JSON body
pub fn bad_request(msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: msg.into() }),
    )
}
