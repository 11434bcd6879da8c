//! Normalization of the provider's polymorphic prediction output.

use crate::client::InferenceError;

/// Extract the generated image URL from a prediction `output` value.
///
/// The provider returns, depending on model and API version:
/// - a non-empty ordered array of URLs (the first is taken),
/// - a bare URL string, or
/// - an object with a `url` field.
///
/// Every other shape (including an empty array or a missing output) is an
/// invalid-response error -- never silently treated as a success.
pub fn normalize_output(output: &serde_json::Value) -> Result<String, InferenceError> {
    match output {
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(InferenceError::InvalidResponse),
        serde_json::Value::String(url) => Ok(url.clone()),
        serde_json::Value::Object(map) => map
            .get("url")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(InferenceError::InvalidResponse),
        _ => Err(InferenceError::InvalidResponse),
    }
}
