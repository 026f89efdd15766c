//! Shared response helpers for the handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use storage::StorageError;
use tracing::error;

/// Build a standard JSON error response.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, axum::Json(body)).into_response()
}

/// Maps a storage error to 400 (bad request) or 500 (store failure).
pub fn storage_error(e: StorageError) -> Response {
    if e.is_client_error() {
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    } else {
        error!(error = %e, "Store query failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}
