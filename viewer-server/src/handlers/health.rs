//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::state::SharedState;

pub async fn health_handler(State(state): State<SharedState>) -> Response {
    match state.repo.ping().await {
        Ok(db) => (
            StatusCode::OK,
            axum::Json(serde_json::json!({ "ok": true, "db": db })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(serde_json::json!({ "ok": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}
