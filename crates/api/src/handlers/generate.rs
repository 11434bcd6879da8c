//! The generation workflow: `POST /api/generate`.
//!
//! End-to-end sequence for one edit request: upload the source image,
//! invoke the inference provider, fetch the generated asset, upload it to
//! the output bucket, and record a `projects` row. Preconditions are
//! checked in a fixed order (provider token, session, buckets, input) and
//! the first failure wins.
//!
//! Objects written before a later step fails are compensated: the
//! workflow keeps a ledger of its uploads and issues best-effort deletes
//! on the error path, so a failed generation does not leave orphaned
//! objects behind.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use pixshift_core::error::CoreError;
use pixshift_core::generation::{validate_prompt, OUTPUT_CONTENT_TYPE};
use pixshift_core::types::UserId;
use pixshift_db::models::project::{CreateProject, Project};
use pixshift_db::repositories::ProjectRepo;
use pixshift_inference::{EditImageRequest, InferenceClient};
use pixshift_storage::{object_key, ObjectStore};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::resolve_session;
use crate::state::AppState;

/// Response body: the created project.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub project: Project,
}

/// The multipart payload after parsing: image bytes + metadata and prompt.
struct GenerateInput {
    filename: String,
    content_type: String,
    image: Bytes,
    prompt: String,
}

/// POST /api/generate
///
/// Multipart fields: `image` (binary, content type preserved) and
/// `prompt` (text). Responds with the created project as JSON, or
/// `{error, code}` with 400/401/402/500.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> AppResult<Json<GenerateResponse>> {
    // Preconditions, in order; first failure wins.
    //
    // 1. Provider credential. Missing configuration outranks even a
    //    missing session: the service cannot generate for anyone.
    let inference = state.inference.clone().ok_or_else(|| {
        AppError::Core(CoreError::Configuration(
            "Inference API token is not configured".into(),
        ))
    })?;

    // 2. Caller identity.
    let claims = resolve_session(&headers, &state.config.jwt).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Authentication required".into()))
    })?;
    let user_id = claims.sub;

    // 3. Bucket configuration.
    let (input_bucket, output_bucket) = configured_buckets(&state)?;

    // 4. Request payload.
    let input = read_multipart(multipart).await?;

    let mut ledger = UploadLedger::default();
    let result = run_generation(
        &state,
        &inference,
        user_id,
        &input_bucket,
        &output_bucket,
        input,
        &mut ledger,
    )
    .await;

    match result {
        Ok(project) => Ok(Json(GenerateResponse { project })),
        Err(err) => {
            ledger.compensate(&state.storage).await;
            Err(err)
        }
    }
}

/// Steps 1-8 of the workflow, excluding compensation. Every object this
/// writes is recorded in `ledger` before anything that can fail next.
async fn run_generation(
    state: &AppState,
    inference: &InferenceClient,
    user_id: UserId,
    input_bucket: &str,
    output_bucket: &str,
    input: GenerateInput,
    ledger: &mut UploadLedger,
) -> AppResult<Project> {
    // Upload the source image; collision-free key, no overwrite.
    let input_key = object_key(user_id, &input.filename);
    state
        .storage
        .upload(input_bucket, &input_key, input.image, &input.content_type)
        .await?;
    ledger.record(input_bucket, &input_key);
    let input_image_url = state.storage.public_url(input_bucket, &input_key);

    tracing::info!(%user_id, %input_image_url, "input image uploaded, invoking provider");

    // Invoke the provider and await the edited image URL.
    let generated_url = inference
        .edit_image(&EditImageRequest {
            image_url: input_image_url.clone(),
            prompt: input.prompt.clone(),
        })
        .await?;

    // Fetch the generated asset.
    let response = state
        .http
        .get(&generated_url)
        .send()
        .await
        .map_err(|e| AppError::AssetFetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(AppError::AssetFetch(format!(
            "provider returned HTTP {} for {generated_url}",
            response.status()
        )));
    }
    let generated_bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::AssetFetch(e.to_string()))?;

    // Upload the result; generated outputs are always PNG.
    let output_key = object_key(user_id, "output.png");
    state
        .storage
        .upload(output_bucket, &output_key, generated_bytes, OUTPUT_CONTENT_TYPE)
        .await?;
    ledger.record(output_bucket, &output_key);
    let output_image_url = state.storage.public_url(output_bucket, &output_key);

    // Record the project. Rows only exist for completed generations.
    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            user_id,
            input_image_url,
            output_image_url: Some(output_image_url),
            prompt: input.prompt,
            status: "completed".to_string(),
        },
    )
    .await?;

    ledger.commit();
    tracing::info!(%user_id, project_id = %project.id, "generation completed");
    Ok(project)
}

/// Require both bucket names from configuration.
fn configured_buckets(state: &AppState) -> AppResult<(String, String)> {
    match (
        state.config.input_bucket.clone(),
        state.config.output_bucket.clone(),
    ) {
        (Some(input), Some(output)) => Ok((input, output)),
        _ => Err(AppError::Core(CoreError::Configuration(
            "Storage buckets are not configured".into(),
        ))),
    }
}

/// Parse the multipart payload into image + prompt, validating both.
async fn read_multipart(mut multipart: Multipart) -> AppResult<GenerateInput> {
    let mut image: Option<(String, String, Bytes)> = None;
    let mut prompt: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("upload.png").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image = Some((filename, content_type, data));
            }
            "prompt" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                prompt = Some(text);
            }
            _ => {
                // Unknown fields are ignored.
            }
        }
    }

    let (Some((filename, content_type, image)), Some(prompt)) = (image, prompt) else {
        return Err(AppError::Core(CoreError::Validation(
            "Image and prompt are required".into(),
        )));
    };

    validate_prompt(&prompt).map_err(AppError::Core)?;

    Ok(GenerateInput {
        filename,
        content_type,
        image,
        prompt,
    })
}

/// Tracks objects written by an in-flight generation so they can be
/// removed if a later step fails.
#[derive(Default)]
struct UploadLedger {
    written: Vec<(String, String)>,
}

impl UploadLedger {
    fn record(&mut self, bucket: &str, key: &str) {
        self.written.push((bucket.to_string(), key.to_string()));
    }

    /// Forget the recorded objects; called once the project row exists
    /// and the objects are owned by it.
    fn commit(&mut self) {
        self.written.clear();
    }

    /// Best-effort removal of every recorded object. Failures are logged
    /// and never mask the original workflow error.
    async fn compensate(self, storage: &Arc<ObjectStore>) {
        for (bucket, key) in &self.written {
            if let Err(err) = storage.remove(bucket, key).await {
                tracing::warn!(%bucket, %key, error = %err, "failed to clean up orphaned object");
            } else {
                tracing::info!(%bucket, %key, "cleaned up orphaned object");
            }
        }
    }
}
