//! HTTP basic-auth gate in front of the UI and the API.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::warn;

use crate::state::SharedState;

/// The single admin account allowed through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Returns `None` when `password` is empty: no password means no gate.
    pub fn from_config(user: &str, password: &str) -> Option<Self> {
        if password.is_empty() {
            return None;
        }
        Some(Self {
            user: user.to_string(),
            password: password.to_string(),
        })
    }

    fn allows(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_basic)
            .is_some_and(|(user, password)| user == self.user && password == self.password)
    }
}

/// Decodes `Basic <base64(user:password)>`. The password may itself contain `:`.
pub fn parse_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Middleware: lets the request through when the gate is open or the credentials match,
/// otherwise answers 401 with a basic-auth challenge.
pub async fn require_basic_auth(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(credentials) = state.credentials.as_ref() else {
        return next.run(request).await;
    };
    if credentials.allows(request.headers()) {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized access attempt");
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"Protected\"")],
        "Auth required",
    )
        .into_response()
}
