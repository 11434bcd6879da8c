use std::sync::Arc;

use pixshift_inference::InferenceClient;
use pixshift_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pixshift_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// S3-compatible object store for input/output images.
    pub storage: Arc<ObjectStore>,
    /// Inference provider client; `None` when no API token is configured,
    /// in which case the generate handler reports a configuration error.
    pub inference: Option<Arc<InferenceClient>>,
    /// Plain HTTP client used to fetch generated assets.
    pub http: reqwest::Client,
}
