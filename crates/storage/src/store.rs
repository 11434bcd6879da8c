//! S3 client wrapper for the input/output image buckets.

use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

/// Errors from the object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An object already exists at the target key. Uploads never
    /// overwrite (no implicit upsert).
    #[error("Object already exists: {bucket}/{key}")]
    AlreadyExists { bucket: String, key: String },

    /// Upload failed for any other reason.
    #[error("Failed to upload object {bucket}/{key}: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },

    /// Removal failed.
    #[error("Failed to remove object {bucket}/{key}: {message}")]
    Remove {
        bucket: String,
        key: String,
        message: String,
    },
}

/// Object store configuration loaded at startup.
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    /// AWS region (S3-compatible endpoints generally ignore this).
    pub region: String,
    /// Custom endpoint URL for MinIO/R2/Supabase-style storage.
    pub endpoint: Option<String>,
    /// Force path-style addressing (required for most custom endpoints).
    pub force_path_style: bool,
    /// Base URL under which objects are publicly retrievable:
    /// `{public_base_url}/{bucket}/{key}`.
    pub public_base_url: String,
}

/// Handle to the S3-compatible object store.
#[derive(Clone)]
pub struct ObjectStore {
    client: Client,
    public_base_url: String,
}

impl ObjectStore {
    /// Build a client from config, with credentials from the environment.
    pub async fn new(config: ObjectStoreConfig) -> Self {
        let sdk_config = aws_config::load_from_env().await;

        let mut builder = Builder::from(&sdk_config)
            .region(Region::new(config.region))
            .force_path_style(config.force_path_style);

        if let Some(endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Wrap an existing client (used by tests).
    pub fn with_client(client: Client, public_base_url: String) -> Self {
        Self {
            client,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The public URL at which an object can be fetched.
    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{bucket}/{key}", self.public_base_url)
    }

    /// The public base URL (needed to reverse URLs back into paths).
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    /// Upload an object, refusing to overwrite an existing one.
    ///
    /// Uses a conditional write (`If-None-Match: *`); a precondition
    /// failure maps to [`StorageError::AlreadyExists`].
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .if_none_match("*")
            .send()
            .await
            .map_err(|e| {
                // A conditional-write conflict surfaces as HTTP 412 with
                // service code PreconditionFailed; check both, not the
                // Display string (which omits the service code).
                let conflict = e.raw_response().is_some_and(|r| r.status().as_u16() == 412)
                    || e.code() == Some("PreconditionFailed");
                if conflict {
                    StorageError::AlreadyExists {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Upload {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: DisplayErrorContext(e).to_string(),
                    }
                }
            })?;

        tracing::debug!(bucket, key, "uploaded object");
        Ok(())
    }

    /// Remove an object. Removing a nonexistent key is not an error in S3.
    pub async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Remove {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(e).to_string(),
            })?;

        tracing::debug!(bucket, key, "removed object");
        Ok(())
    }
}
