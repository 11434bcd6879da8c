//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so integration tests
//! exercise the same middleware stack (session gating, CORS, request ID,
//! timeout, tracing, panic recovery) that production uses. No external
//! service is contacted on the tested paths: the object store and
//! inference client point at unroutable endpoints.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use pixshift_api::auth::jwt::{generate_access_token, JwtConfig};
use pixshift_api::config::ServerConfig;
use pixshift_api::router::build_app_router;
use pixshift_api::state::AppState;
use pixshift_core::types::UserId;
use pixshift_inference::InferenceClient;
use pixshift_storage::{ObjectStore, ObjectStoreConfig};

/// Public base URL used for object URLs in tests.
pub const TEST_STORAGE_PUBLIC_URL: &str = "http://storage.test/object/public";

/// Build a test `JwtConfig` with a known secret.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-with-plenty-of-entropy".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build a fully-populated test `ServerConfig` (token and buckets set).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
        inference_api_token: Some("test-token".to_string()),
        inference_api_url: "http://127.0.0.1:9".to_string(),
        input_bucket: Some("inputs".to_string()),
        output_bucket: Some("outputs".to_string()),
        object_store: ObjectStoreConfig {
            region: "us-east-1".to_string(),
            endpoint: Some("http://127.0.0.1:9".to_string()),
            force_path_style: true,
            public_base_url: TEST_STORAGE_PUBLIC_URL.to_string(),
        },
    }
}

/// Build the application router for a given config.
pub async fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let storage = ObjectStore::new(config.object_store.clone()).await;
    build_app_with_storage(pool, config, storage).await
}

/// Build the application router with an explicit object store, so tests
/// can point storage at a stub S3 server.
pub async fn build_app_with_storage(
    pool: PgPool,
    config: ServerConfig,
    storage: ObjectStore,
) -> Router {
    let inference = config.inference_api_token.as_ref().map(|token| {
        Arc::new(InferenceClient::new(
            config.inference_api_url.clone(),
            token.clone(),
        ))
    });

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::new(storage),
        inference,
        http: reqwest::Client::new(),
    };

    build_app_router(state, &config)
}

/// Object store aimed at a stub S3 endpoint, with static credentials so
/// no real AWS configuration is consulted.
pub fn stub_object_store(endpoint: &str) -> ObjectStore {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
        .region(aws_sdk_s3::config::Region::new("us-east-1"))
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            "test", "test", None, None, "static",
        ))
        .endpoint_url(endpoint)
        .force_path_style(true)
        .build();
    ObjectStore::with_client(
        aws_sdk_s3::Client::from_conf(config),
        TEST_STORAGE_PUBLIC_URL.to_string(),
    )
}

/// Build the full application router with everything configured.
pub async fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config()).await
}

/// Build an app with no inference token configured.
pub async fn build_test_app_without_inference(pool: PgPool) -> Router {
    let config = ServerConfig {
        inference_api_token: None,
        ..test_config()
    };
    build_app_with_config(pool, config).await
}

/// Build an app with no bucket names configured.
pub async fn build_test_app_without_buckets(pool: PgPool) -> Router {
    let config = ServerConfig {
        input_bucket: None,
        output_bucket: None,
        ..test_config()
    };
    build_app_with_config(pool, config).await
}

/// Bearer token for a known user, signed with the test JWT secret.
pub fn bearer_token_for(user_id: UserId, email: &str) -> String {
    generate_access_token(user_id, email, &test_jwt_config())
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a JSON body and a Bearer token.
pub async fn delete_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a multipart POST (used by the generate endpoint tests).
///
/// `fields` is a list of `(name, filename, content_type, data)`; pass
/// `None` for filename/content_type on plain text fields.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, Option<&str>, Option<&str>, Vec<u8>)],
) -> Response<Body> {
    let boundary = "pixshift-test-boundary";
    let mut body: Vec<u8> = Vec::new();

    for (name, filename, content_type, data) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n").as_bytes(),
            ),
        }
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
