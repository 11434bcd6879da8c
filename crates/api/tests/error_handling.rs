//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct
//! HTTP status code, error code, and message. They do NOT need an HTTP
//! server -- they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use http_body_util::BodyExt;
use uuid::Uuid;

use pixshift_api::error::AppError;
use pixshift_core::error::CoreError;
use pixshift_inference::InferenceError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let id = Uuid::nil();
    let err = AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Project with id {id} not found"));
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Unauthorized maps to 401 with UNAUTHORIZED code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Authentication required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Authentication required");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Image and prompt are required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Image and prompt are required");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Configuration maps to 500 with CONFIGURATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configuration_error_returns_500_with_message() {
    let err = AppError::Core(CoreError::Configuration(
        "Inference API token is not configured".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
    // Configuration errors keep their message: they are operator-facing
    // and never carry user data.
    assert_eq!(json["error"], "Inference API token is not configured");
}

// ---------------------------------------------------------------------------
// Test: payment-required inference errors map to 402, never 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn payment_required_error_returns_402_with_guidance() {
    let err = AppError::Inference(InferenceError::PaymentRequired(
        "Insufficient credit to run this model".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::PAYMENT_REQUIRED);
    assert_eq!(json["code"], "PAYMENT_REQUIRED");
    let message = json["error"].as_str().unwrap();
    assert!(
        message.contains("top up"),
        "402 body must carry payment guidance, got: {message}"
    );
}

// ---------------------------------------------------------------------------
// Test: generic inference errors map to 500 with UPSTREAM_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_error_returns_500() {
    let err = AppError::Inference(InferenceError::Api {
        status: 503,
        body: "model is warming up".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

// ---------------------------------------------------------------------------
// Test: invalid provider response shape maps to 500 UPSTREAM_ERROR
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_response_error_returns_500() {
    let err = AppError::Inference(InferenceError::InvalidResponse);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Invalid inference response format");
}

// ---------------------------------------------------------------------------
// Test: asset fetch failures map to 500 with FETCH_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn asset_fetch_error_returns_500() {
    let err = AppError::AssetFetch("connection reset by peer".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "FETCH_ERROR");

    // Transport details stay in the logs, not the response.
    let body_text = json.to_string();
    assert!(!body_text.contains("connection reset"));
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    // The response body must NOT contain the original error details.
    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}
