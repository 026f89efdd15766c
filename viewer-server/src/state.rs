//! Shared application state.

use std::sync::Arc;

use storage::Repository;

use crate::auth::Credentials;

pub struct AppState {
    pub repo: Arc<dyn Repository>,
    /// `None` leaves the auth gate open.
    pub credentials: Option<Credentials>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, credentials: Option<Credentials>) -> SharedState {
        Arc::new(Self { repo, credentials })
    }
}

pub type SharedState = Arc<AppState>;
