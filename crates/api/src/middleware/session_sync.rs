//! Path-based session gating for browser navigations.
//!
//! Mirrors the navigation rules of the web frontend: protected pages
//! require a session and bounce to the login page (recording where the
//! user came from); auth pages bounce signed-in users to the dashboard.
//! API routes are deliberately left alone here -- their handlers answer
//! with the JSON 401 contract instead of a redirect.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::middleware::auth::resolve_session;
use crate::state::AppState;

/// Page paths that require a valid session.
const PROTECTED_PREFIXES: &[&str] = &["/dashboard"];

/// Pages only shown to signed-out visitors.
const AUTH_PREFIXES: &[&str] = &["/login", "/signup"];

/// Axum middleware enforcing the navigation rules above.
pub async fn session_sync(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let session = resolve_session(request.headers(), &state.config.jwt);

    let is_protected = PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p));
    let is_auth_page = AUTH_PREFIXES.iter().any(|p| path.starts_with(p));

    if session.is_none() && is_protected {
        let target = format!("/login?redirectedFrom={path}");
        return Redirect::temporary(&target).into_response();
    }

    if session.is_some() && is_auth_page {
        return Redirect::temporary("/dashboard").into_response();
    }

    next.run(request).await
}
