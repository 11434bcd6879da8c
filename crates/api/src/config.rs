use pixshift_storage::ObjectStoreConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Settings the workflows need per-request (inference token, bucket
/// names) are carried as `Option` rather than required at startup: their
/// absence is reported by the handlers as a configuration error, in the
/// documented precondition order, instead of preventing boot.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Inference provider API token (`INFERENCE_API_TOKEN`).
    pub inference_api_token: Option<String>,
    /// Inference provider base URL (default: `https://api.replicate.com`).
    pub inference_api_url: String,
    /// Bucket for uploaded source images (`INPUT_BUCKET`).
    pub input_bucket: Option<String>,
    /// Bucket for generated output images (`OUTPUT_BUCKET`).
    pub output_bucket: Option<String>,
    /// Object store connection settings.
    pub object_store: ObjectStoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                        |
    /// |--------------------------|--------------------------------|
    /// | `HOST`                   | `0.0.0.0`                      |
    /// | `PORT`                   | `3000`                         |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                           |
    /// | `INFERENCE_API_TOKEN`    | unset                          |
    /// | `INFERENCE_API_URL`      | `https://api.replicate.com`    |
    /// | `INPUT_BUCKET`           | unset                          |
    /// | `OUTPUT_BUCKET`          | unset                          |
    /// | `STORAGE_REGION`         | `us-east-1`                    |
    /// | `STORAGE_ENDPOINT`       | unset (AWS S3)                 |
    /// | `STORAGE_PUBLIC_URL`     | **required**                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let inference_api_token = std::env::var("INFERENCE_API_TOKEN").ok();
        let inference_api_url = std::env::var("INFERENCE_API_URL")
            .unwrap_or_else(|_| "https://api.replicate.com".into());

        let input_bucket = std::env::var("INPUT_BUCKET").ok();
        let output_bucket = std::env::var("OUTPUT_BUCKET").ok();

        let endpoint = std::env::var("STORAGE_ENDPOINT").ok();
        let object_store = ObjectStoreConfig {
            region: std::env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".into()),
            // Custom endpoints (MinIO, Supabase storage) need path-style keys.
            force_path_style: endpoint.is_some(),
            endpoint,
            public_base_url: std::env::var("STORAGE_PUBLIC_URL")
                .expect("STORAGE_PUBLIC_URL must be set"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            inference_api_token,
            inference_api_url,
            input_bucket,
            output_bucket,
            object_store,
        }
    }
}
