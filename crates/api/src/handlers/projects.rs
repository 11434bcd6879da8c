//! Handlers for the `/projects` resource: listing and the deletion
//! workflow.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pixshift_core::error::CoreError;
use pixshift_db::models::project::Project;
use pixshift_db::repositories::ProjectRepo;
use pixshift_storage::{extract_object_path, ObjectStore, StorageError};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `DELETE /api/delete`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectRequest {
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Response body for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteProjectResponse {
    pub success: bool,
}

/// GET /api/projects
///
/// List the caller's projects, most recently created first.
pub async fn list_projects(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(projects))
}

/// DELETE /api/delete
///
/// The deletion workflow: remove the project's stored objects (if any)
/// and then its row. The row lookup is scoped to the caller -- another
/// user's project id behaves exactly like a nonexistent one (404).
pub async fn delete_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<DeleteProjectRequest>,
) -> AppResult<Json<DeleteProjectResponse>> {
    // Bucket configuration is required before anything else can proceed.
    let (input_bucket, output_bucket) = match (
        state.config.input_bucket.as_deref(),
        state.config.output_bucket.as_deref(),
    ) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            return Err(AppError::Core(CoreError::Configuration(
                "Storage buckets are not configured".into(),
            )))
        }
    };

    let project_id = input
        .project_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Project id is required".into()))?;
    let project_id: Uuid = project_id
        .parse()
        .map_err(|_| AppError::BadRequest("Project id must be a valid UUID".into()))?;

    let project = ProjectRepo::find_by_id_for_user(&state.pool, project_id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    // Derive storage paths from the two URL fields. A URL that does not
    // point into the expected bucket is skipped (already absent).
    let base = state.storage.public_base_url();
    let mut objects_to_remove: Vec<(String, String)> = Vec::new();

    if let Some(path) = extract_object_path(&project.input_image_url, base, input_bucket) {
        objects_to_remove.push((input_bucket.to_string(), path));
    }
    if let Some(url) = &project.output_image_url {
        if let Some(path) = extract_object_path(url, base, output_bucket) {
            objects_to_remove.push((output_bucket.to_string(), path));
        }
    }

    // Remove all objects concurrently and wait for every result; any
    // failure aborts before the row is touched.
    remove_objects(&state.storage, &objects_to_remove).await?;

    let deleted =
        ProjectRepo::delete_by_id_for_user(&state.pool, project_id, auth_user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }

    tracing::info!(user_id = %auth_user.user_id, %project_id, "project deleted");
    Ok(Json(DeleteProjectResponse { success: true }))
}

/// Issue all removals concurrently; an all-or-nothing join, not a race.
async fn remove_objects(
    storage: &Arc<ObjectStore>,
    objects: &[(String, String)],
) -> Result<(), StorageError> {
    let removals = objects
        .iter()
        .map(|(bucket, path)| storage.remove(bucket, path));

    let results: Vec<Result<(), StorageError>> = join_all(removals).await;
    results.into_iter().collect()
}
