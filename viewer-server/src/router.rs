//! Axum router construction.

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::auth::require_basic_auth;
use crate::handlers;
use crate::state::SharedState;
use crate::static_files::index_handler;

/// Build the complete router. Everything except `/health` sits behind the basic-auth gate.
pub fn build_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/", get(index_handler))
        .route(
            "/api/instances",
            get(handlers::directory::list_instances_handler),
        )
        .route("/api/chats", get(handlers::directory::list_chats_handler))
        // Messages API
        .route(
            "/api/messages",
            get(handlers::messages::list_messages_handler),
        )
        .route(
            "/api/messages.csv",
            get(handlers::messages::export_messages_handler),
        )
        .route(
            "/api/messages/:message_id",
            get(handlers::messages::get_message_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected)
        .with_state(state)
}
