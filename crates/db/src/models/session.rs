//! Session entity model.
//!
//! Only the SHA-256 hash of a refresh token is stored, so a database
//! leak does not compromise active sessions.

use sqlx::FromRow;
use uuid::Uuid;

use pixshift_core::types::{Timestamp, UserId};

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: UserId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: UserId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
