//! HTTP client for the prediction API, using [`reqwest`].

use serde::Deserialize;

use pixshift_core::generation::{
    GUIDANCE_SCALE, IMAGE_GUIDANCE_SCALE, MODEL_VERSION, NUM_INFERENCE_STEPS,
};

use crate::output::normalize_output;

/// Errors from the inference provider layer.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider rejected the request because the account has no
    /// remaining credit. Surfaced as a distinct error so callers can
    /// render payment guidance instead of a generic failure.
    #[error("Insufficient provider credit: {0}")]
    PaymentRequired(String),

    /// The provider returned a non-2xx status code.
    #[error("Inference API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The prediction succeeded but its output had no recognizable shape.
    #[error("Invalid inference response format")]
    InvalidResponse,
}

/// One image-edit request. The strength parameters are fixed policy
/// constants; only the image URL and prompt vary per call.
#[derive(Debug, Clone)]
pub struct EditImageRequest {
    /// Publicly resolvable URL of the source image.
    pub image_url: String,
    /// Edit instruction.
    pub prompt: String,
}

/// Prediction envelope returned by the provider.
#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    output: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the inference provider.
pub struct InferenceClient {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
}

impl InferenceClient {
    /// Create a new client.
    ///
    /// * `api_url` - Base URL, e.g. `https://api.replicate.com`.
    /// * `api_token` - Bearer token for the provider account.
    pub fn new(api_url: String, api_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    /// Run one image edit and return the URL of the generated image.
    ///
    /// Submits a prediction with `Prefer: wait` so the call blocks until
    /// the model finishes, then normalizes the polymorphic output.
    pub async fn edit_image(&self, request: &EditImageRequest) -> Result<String, InferenceError> {
        let body = serde_json::json!({
            "version": MODEL_VERSION,
            "input": {
                "image": request.image_url,
                "prompt": request.prompt,
                "num_inference_steps": NUM_INFERENCE_STEPS,
                "image_guidance_scale": IMAGE_GUIDANCE_SCALE,
                "guidance_scale": GUIDANCE_SCALE,
            },
        });

        let response = self
            .client
            .post(format!("{}/v1/predictions", self.api_url))
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(classify_api_error(status.as_u16(), text));
        }

        let prediction: Prediction =
            serde_json::from_str(&text).map_err(|_| InferenceError::InvalidResponse)?;

        if let Some(message) = prediction.error {
            return Err(classify_api_error(status.as_u16(), message));
        }

        let url = normalize_output(&prediction.output)?;
        tracing::debug!(%url, "prediction completed");
        Ok(url)
    }
}

/// Map a provider failure to the right error variant.
///
/// An insufficient-balance condition (HTTP 402, or a message mentioning
/// `402` or `Insufficient credit`) becomes [`InferenceError::PaymentRequired`];
/// everything else is a generic API error.
fn classify_api_error(status: u16, body: String) -> InferenceError {
    if status == 402 || body.contains("402") || body.contains("Insufficient credit") {
        InferenceError::PaymentRequired(body)
    } else {
        InferenceError::Api { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn edit_request() -> EditImageRequest {
        EditImageRequest {
            image_url: "https://cdn.example.com/storage/inputs/u/cat.png".to_string(),
            prompt: "add a party hat".to_string(),
        }
    }

    #[tokio::test]
    async fn test_edit_image_returns_first_array_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .and(header("Prefer", "wait"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "succeeded",
                "output": ["https://out.example/generated.png"],
                "error": null,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InferenceClient::new(server.uri(), "test-token".to_string());
        let url = client.edit_image(&edit_request()).await.unwrap();
        assert_eq!(url, "https://out.example/generated.png");
    }

    #[tokio::test]
    async fn test_http_402_maps_to_payment_required() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .respond_with(ResponseTemplate::new(402).set_body_string("Payment Required"))
            .mount(&server)
            .await;

        let client = InferenceClient::new(server.uri(), "test-token".to_string());
        let err = client.edit_image(&edit_request()).await.unwrap_err();
        assert!(matches!(err, InferenceError::PaymentRequired(_)));
    }

    #[tokio::test]
    async fn test_insufficient_credit_message_maps_to_payment_required() {
        let server = MockServer::start().await;

        // Some provider errors arrive as a 200 envelope with an error field.
        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "failed",
                "output": null,
                "error": "Insufficient credit to run this model",
            })))
            .mount(&server)
            .await;

        let client = InferenceClient::new(server.uri(), "test-token".to_string());
        let err = client.edit_image(&edit_request()).await.unwrap_err();
        assert!(matches!(err, InferenceError::PaymentRequired(_)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = InferenceClient::new(server.uri(), "test-token".to_string());
        let err = client.edit_image(&edit_request()).await.unwrap_err();
        assert!(matches!(err, InferenceError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unrecognized_output_shape_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "succeeded",
                "output": {"id": "no-url-here"},
                "error": null,
            })))
            .mount(&server)
            .await;

        let client = InferenceClient::new(server.uri(), "test-token".to_string());
        let err = client.edit_image(&edit_request()).await.unwrap_err();
        assert!(matches!(err, InferenceError::InvalidResponse));
    }
}
