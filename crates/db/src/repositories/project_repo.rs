//! Repository for the `projects` table.
//!
//! Every lookup and mutation that acts on a single project is scoped to
//! the owning user. Cross-user access is rejected at the query level; the
//! store's own row-level policy (if any) is defense in depth, not the
//! primary guarantee.

use sqlx::PgPool;

use pixshift_core::types::{ProjectId, UserId};

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, input_image_url, output_image_url, prompt, status, created_at";

/// Provides insert/lookup/delete operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, input_image_url, output_image_url, prompt, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.input_image_url)
            .bind(&input.output_image_url)
            .bind(&input.prompt)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a project by id, scoped to its owner.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: ProjectId,
        user_id: UserId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects for a user, most recently created first.
    pub async fn list_by_user(pool: &PgPool, user_id: UserId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a project by id, scoped to its owner.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_by_id_for_user(
        pool: &PgPool,
        id: ProjectId,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
