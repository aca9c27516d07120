//! Object storage trait for pluggable blob backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// A blob accepted by an [`ObjectStorage`] backend.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredObject {
    /// Durable public address of the blob.
    pub url: String,
    /// Provider-internal key the URL maps to.
    pub key: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// MIME type recorded at upload (if known).
    pub content_type: Option<String>,
}

/// Result of deleting a blob by URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The blob existed and was removed.
    Deleted,
    /// Nothing was stored under that URL.
    NotFound,
}

/// Target box for a resized display variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Maximum width in pixels.
    pub width: u32,
    /// Maximum height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create a new bounding box.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square bounding box.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }
}

/// Trait for blob storage backends.
///
/// Blobs are addressed purely by URL once uploaded. Implementations exist
/// for the local filesystem, an in-memory map, and S3-compatible buckets;
/// the trait is defined here in `medialib-core` and implemented in
/// `medialib-storage`.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` and return its durable URL.
    ///
    /// `destination_hint` is a slash-separated key suggestion; providers may
    /// prefix or sanitize it. Size and type limits are enforced here and
    /// reported as [`crate::ErrorKind::Upload`].
    async fn upload(
        &self,
        data: Bytes,
        destination_hint: &str,
        content_type: Option<&str>,
    ) -> AppResult<StoredObject>;

    /// Delete the blob addressed by `url`.
    async fn delete(&self, url: &str) -> AppResult<DeleteOutcome>;

    /// Check whether a blob exists at `url`.
    async fn exists(&self, url: &str) -> AppResult<bool>;

    /// Return a URL for a resized variant of the blob at `url`.
    ///
    /// Best effort: providers that cannot resize a given source return the
    /// original URL unchanged.
    async fn resize(&self, url: &str, dimensions: Dimensions) -> AppResult<String> {
        let _ = dimensions;
        Ok(url.to_string())
    }
}
