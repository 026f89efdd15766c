//! Instance and chat listing handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use storage::ChatQuery;

use crate::state::SharedState;
use crate::utils::storage_error;

pub async fn list_instances_handler(State(state): State<SharedState>) -> Response {
    match state.repo.list_instances().await {
        Ok(instances) => (StatusCode::OK, axum::Json(instances)).into_response(),
        Err(e) => storage_error(e),
    }
}

pub async fn list_chats_handler(
    State(state): State<SharedState>,
    Query(params): Query<ChatQuery>,
) -> Response {
    let filter = match params.to_filter() {
        Ok(filter) => filter,
        Err(e) => return storage_error(e),
    };
    match state.repo.list_chats(&filter).await {
        Ok(chats) => (StatusCode::OK, axum::Json(chats)).into_response(),
        Err(e) => storage_error(e),
    }
}
