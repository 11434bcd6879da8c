//! Waiting-list entry model.

use serde::Serialize;
use sqlx::FromRow;

use pixshift_core::types::Timestamp;

/// A row from the `waiting_list` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaitingListEntry {
    pub id: i64,
    pub email: Option<String>,
    pub created_at: Timestamp,
}
