//! Message listing, CSV export and raw lookup handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use storage::{to_csv, MessageFilter, MessagePage, MessageQuery, StorageError};

use crate::state::SharedState;
use crate::utils::{api_error, storage_error};

/// Page size used by the CSV export when the request does not set one; still clamped.
pub const EXPORT_DEFAULT_LIMIT: i64 = 2000;

pub async fn list_messages_handler(
    State(state): State<SharedState>,
    Query(params): Query<MessageQuery>,
) -> Response {
    match fetch_page(&state, params.to_filter()).await {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(e) => storage_error(e),
    }
}

/// Same filter contract as the listing; renders the fetched page as CSV.
pub async fn export_messages_handler(
    State(state): State<SharedState>,
    Query(params): Query<MessageQuery>,
) -> Response {
    let filter = params.to_filter_with_default_limit(EXPORT_DEFAULT_LIMIT);
    match fetch_page(&state, filter).await {
        Ok(page) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"messages.csv\"",
                ),
            ],
            to_csv(&page.rows),
        )
            .into_response(),
        Err(e) => storage_error(e),
    }
}

pub async fn get_message_handler(
    State(state): State<SharedState>,
    Path(message_id): Path<String>,
) -> Response {
    match state.repo.get_message(&message_id).await {
        Ok(Some(message)) => (StatusCode::OK, axum::Json(message)).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "not found"),
        Err(e) => storage_error(e),
    }
}

async fn fetch_page(
    state: &SharedState,
    filter: Result<MessageFilter, StorageError>,
) -> Result<MessagePage, StorageError> {
    state.repo.list_messages(&filter?).await
}
