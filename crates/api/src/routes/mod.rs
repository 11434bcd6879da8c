pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Request body ceiling for image uploads. The axum default (2 MB) is
/// below a typical phone photo.
const GENERATE_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup          create account (public)
/// /auth/login           login (public)
/// /auth/refresh         rotate tokens (public)
/// /auth/logout          logout (requires auth)
/// /auth/callback        session-cookie sync (public)
///
/// /generate             generation workflow (requires auth)
/// /projects             list caller's projects (requires auth)
/// /delete               deletion workflow (requires auth)
///
/// /waiting-list         landing-page email capture (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/callback", post(handlers::auth::callback))
        .route(
            "/generate",
            post(handlers::generate::generate).layer(DefaultBodyLimit::max(GENERATE_BODY_LIMIT)),
        )
        .route("/projects", get(handlers::projects::list_projects))
        .route("/delete", delete(handlers::projects::delete_project))
        .route("/waiting-list", post(handlers::waiting_list::join))
}
