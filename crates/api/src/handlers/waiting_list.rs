//! Handler for `/waiting-list` -- landing-page email capture.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use pixshift_core::error::CoreError;
use pixshift_db::models::waiting_list::WaitingListEntry;
use pixshift_db::repositories::WaitingListRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /api/waiting-list`.
#[derive(Debug, Deserialize)]
pub struct JoinWaitingListRequest {
    pub email: String,
}

/// POST /api/waiting-list
///
/// No authentication: this is the landing-page capture form.
pub async fn join(
    State(state): State<AppState>,
    Json(input): Json<JoinWaitingListRequest>,
) -> AppResult<(StatusCode, Json<WaitingListEntry>)> {
    let email = input.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }

    let entry = WaitingListRepo::create(&state.pool, email).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
