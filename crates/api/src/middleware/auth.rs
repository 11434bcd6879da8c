//! JWT-based authentication extractor for Axum handlers.
//!
//! A session credential can arrive two ways: an `Authorization: Bearer`
//! header (API clients) or the `pixshift_session` cookie installed by the
//! auth-callback endpoint (browser navigations). The extractor accepts
//! both, header first.

use axum::extract::FromRequestParts;
use axum::http::header::HeaderMap;
use axum::http::request::Parts;

use pixshift_core::error::CoreError;
use pixshift_core::types::UserId;

use crate::auth::jwt::{validate_token, Claims, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Name of the server-readable session cookie.
pub const SESSION_COOKIE: &str = "pixshift_session";

/// Authenticated user extracted from a Bearer token or session cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: UserId,
    /// The user's email (from `claims.email`).
    pub email: String,
}

/// Pull the raw access token out of the request headers, if any.
///
/// Checks the `Authorization: Bearer` header first, then the session cookie.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }

    headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                pair.trim()
                    .strip_prefix(&format!("{SESSION_COOKIE}="))
                    .map(str::to_string)
            })
        })
}

/// Resolve the current session from request headers, if one exists and
/// validates. Used by both the extractor and the session-sync middleware.
pub fn resolve_session(headers: &HeaderMap, config: &JwtConfig) -> Option<Claims> {
    let token = extract_access_token(headers)?;
    validate_token(&token, config).ok()
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = resolve_session(&parts.headers, &state.config.jwt).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
