//! S3-compatible object storage for uploaded and generated images.
//!
//! Objects are addressed by `{bucket, key}` and retrievable through a
//! public base URL (`{public_base_url}/{bucket}/{key}`), so the rest of
//! the system only ever passes URLs around. Works against AWS S3 or any
//! path-style-compatible endpoint (MinIO, R2, Supabase storage).

mod key;
mod store;

pub use key::{extract_object_path, object_key};
pub use store::{ObjectStore, ObjectStoreConfig, StorageError};
