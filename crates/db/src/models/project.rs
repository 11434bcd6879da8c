//! Project entity model and DTOs.
//!
//! A project records one image edit: the prompt, the public URLs of the
//! input and output objects, and a lifecycle status. Rows are inserted
//! once (after both objects exist in storage) and deleted once; there is
//! no update path.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pixshift_core::types::{ProjectId, Timestamp, UserId};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: UserId,
    pub input_image_url: String,
    pub output_image_url: Option<String>,
    pub prompt: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub user_id: UserId,
    pub input_image_url: String,
    pub output_image_url: Option<String>,
    pub prompt: String,
    pub status: String,
}
