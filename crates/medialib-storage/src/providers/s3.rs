//! S3-compatible object storage (requires the `s3` feature).

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use medialib_core::config::storage::S3StorageConfig;
use medialib_core::error::{AppError, ErrorKind};
use medialib_core::result::AppResult;
use medialib_core::traits::storage::{DeleteOutcome, ObjectStorage, StoredObject};

use crate::keys::{key_for, object_key, url_for};
use crate::limits::UploadLimits;

/// Stores blobs in an S3 bucket and addresses them below a public base URL.
#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
    limits: UploadLimits,
}

impl S3ObjectStorage {
    /// Create a provider from explicit bucket settings.
    pub fn new(config: &S3StorageConfig, public_base_url: &str, limits: UploadLimits) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("storage.s3.bucket must be set"));
        }
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 object storage"
        );

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "medialib-config",
        );
        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(config.endpoint.clone());
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            limits,
        })
    }

    async fn head(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .is_some_and(|service| service.is_not_found());
                if not_found {
                    Ok(false)
                } else {
                    Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to stat object: {key}"),
                        e,
                    ))
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "S3 health check failed", e))
    }

    async fn upload(
        &self,
        data: Bytes,
        destination_hint: &str,
        content_type: Option<&str>,
    ) -> AppResult<StoredObject> {
        self.limits.check(data.len() as u64, content_type)?;

        let key = object_key(destination_hint);
        let size_bytes = data.len() as u64;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .set_content_type(content_type.map(str::to_string))
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Upload, format!("Failed to upload object: {key}"), e)
            })?;

        debug!(key = %key, bytes = size_bytes, "Uploaded object to S3");
        Ok(StoredObject {
            url: url_for(&self.public_base_url, &key),
            key,
            size_bytes,
            content_type: content_type.map(str::to_string),
        })
    }

    async fn delete(&self, url: &str) -> AppResult<DeleteOutcome> {
        let Some(key) = key_for(&self.public_base_url, url) else {
            return Ok(DeleteOutcome::NotFound);
        };
        // S3 deletes succeed for missing keys, so existence is checked first.
        if !self.head(key).await? {
            return Ok(DeleteOutcome::NotFound);
        }
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Deletion, format!("Failed to delete object: {key}"), e)
            })?;
        debug!(key, "Deleted object from S3");
        Ok(DeleteOutcome::Deleted)
    }

    async fn exists(&self, url: &str) -> AppResult<bool> {
        match key_for(&self.public_base_url, url) {
            Some(key) => self.head(key).await,
            None => Ok(false),
        }
    }
}
