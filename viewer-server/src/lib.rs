//! # viewer-server
//!
//! Read-only HTTP front end for the chat-message store: the embedded UI, JSON listings of
//! instances, chats and messages, CSV export and raw message lookup, behind an optional
//! basic-auth gate.

pub mod auth;
pub mod handlers;
pub mod router;
pub mod state;
pub mod static_files;
pub mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use storage::ViewerStore;
use tokio::net::TcpListener;
use tracing::info;
use viewer_core::ViewerConfig;

pub use auth::Credentials;
pub use router::build_router;
pub use state::{AppState, SharedState};

/// Opens the store, binds `0.0.0.0:<port>` and serves until Ctrl-C. The pool is closed on the way out.
pub async fn run_server(config: ViewerConfig) -> Result<()> {
    let store = ViewerStore::connect(
        &config.database_url,
        &config.db_schema,
        config.db_max_connections,
    )
    .await
    .context("Failed to open message store")?;
    let pool_manager = store.pool_manager().clone();

    if !config.auth_enabled() {
        info!("ADMIN_PASSWORD is empty, basic auth disabled");
    }
    let credentials = Credentials::from_config(&config.admin_user, &config.admin_password);
    let state = AppState::new(Arc::new(store), credentials);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, schema = %config.db_schema, "Messages viewer listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool_manager.close().await;
    info!("Messages viewer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
