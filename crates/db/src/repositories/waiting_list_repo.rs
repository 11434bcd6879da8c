//! Repository for the `waiting_list` table.

use sqlx::PgPool;

use crate::models::waiting_list::WaitingListEntry;

const COLUMNS: &str = "id, email, created_at";

/// Provides landing-page email capture.
pub struct WaitingListRepo;

impl WaitingListRepo {
    /// Insert a new waiting-list entry, returning the created row.
    pub async fn create(pool: &PgPool, email: &str) -> Result<WaitingListEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO waiting_list (email) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WaitingListEntry>(&query)
            .bind(email)
            .fetch_one(pool)
            .await
    }
}
