//! Identifier and timestamp aliases shared across crates.

/// User identifier (UUID primary key of the `users` table).
pub type UserId = uuid::Uuid;

/// Project identifier (UUID primary key of the `projects` table).
pub type ProjectId = uuid::Uuid;

/// UTC timestamp as stored in `timestamptz` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
