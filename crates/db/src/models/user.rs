//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pixshift_core::types::{Timestamp, UserId};

/// A row from the `users` table.
///
/// `password_hash` is intentionally not serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
}

/// Public user info safe to embed in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}
