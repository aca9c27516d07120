//! Local filesystem object storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, warn};

use medialib_core::error::{AppError, ErrorKind};
use medialib_core::result::AppResult;
use medialib_core::traits::storage::{DeleteOutcome, Dimensions, ObjectStorage, StoredObject};

use crate::keys::{key_for, object_key, url_for};
use crate::limits::UploadLimits;
use crate::variant::VariantResizer;

/// Stores blobs under a root directory and addresses them below a public base URL.
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    /// Root directory for all stored objects.
    root: PathBuf,
    /// URL prefix mapped onto `root`.
    public_base_url: String,
    limits: UploadLimits,
    variants: VariantResizer,
}

impl LocalObjectStorage {
    /// Create a provider rooted at `root_path`, creating the directory if needed.
    pub async fn new(
        root_path: &str,
        public_base_url: &str,
        limits: UploadLimits,
        variants: VariantResizer,
    ) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            limits,
            variants,
        })
    }

    /// Resolve an object key to a path within the root.
    fn resolve(&self, key: &str) -> PathBuf {
        self.root.join(key.trim_start_matches('/'))
    }

    /// Resolve a public URL to a path within the root.
    fn resolve_url(&self, url: &str) -> Option<(String, PathBuf)> {
        key_for(&self.public_base_url, url).map(|key| (key.to_string(), self.resolve(key)))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn write(&self, key: &str, data: &[u8]) -> AppResult<()> {
        let full_path = self.resolve(key);
        self.ensure_parent(&full_path).await?;
        fs::write(&full_path, data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Upload, format!("Failed to write object: {key}"), e)
        })
    }

    /// Remove every cached variant rendered from `source_key`.
    async fn delete_variants(&self, source_key: &str) {
        let variant_file = self.variants.variant_file(source_key);
        let Ok(mut sizes) = fs::read_dir(self.resolve(self.variants.variant_dir())).await else {
            return;
        };
        while let Ok(Some(entry)) = sizes.next_entry().await {
            let candidate = entry.path().join(&variant_file);
            if fs::remove_file(&candidate).await.is_ok() {
                debug!(path = %candidate.display(), "Removed cached variant");
            }
        }
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn upload(
        &self,
        data: Bytes,
        destination_hint: &str,
        content_type: Option<&str>,
    ) -> AppResult<StoredObject> {
        self.limits.check(data.len() as u64, content_type)?;

        let key = object_key(destination_hint);
        self.write(&key, &data).await?;

        let url = url_for(&self.public_base_url, &key);
        debug!(key = %key, bytes = data.len(), "Stored object");
        Ok(StoredObject {
            url,
            key,
            size_bytes: data.len() as u64,
            content_type: content_type.map(str::to_string),
        })
    }

    async fn delete(&self, url: &str) -> AppResult<DeleteOutcome> {
        let Some((key, full_path)) = self.resolve_url(url) else {
            debug!(url, "URL is not served by this provider");
            return Ok(DeleteOutcome::NotFound);
        };
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                self.delete_variants(&key).await;
                debug!(key = %key, "Deleted object");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Deletion,
                format!("Failed to delete object: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, url: &str) -> AppResult<bool> {
        Ok(self
            .resolve_url(url)
            .is_some_and(|(_, path)| path.is_file()))
    }

    async fn resize(&self, url: &str, dimensions: Dimensions) -> AppResult<String> {
        let Some((key, source_path)) = self.resolve_url(url) else {
            return Ok(url.to_string());
        };
        if !VariantResizer::is_supported(&key) || self.variants.is_variant_key(&key) {
            return Ok(url.to_string());
        }

        let variant_key = self.variants.variant_key(&key, dimensions);
        if self.resolve(&variant_key).is_file() {
            return Ok(url_for(&self.public_base_url, &variant_key));
        }

        let source = match fs::read(&source_path).await {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => {
                debug!(key = %key, error = %e, "Variant source unreadable, using original");
                return Ok(url.to_string());
            }
        };
        match self.variants.render(source, dimensions).await {
            Ok(rendered) => {
                self.write(&variant_key, &rendered).await?;
                debug!(
                    source = %key,
                    width = dimensions.width,
                    height = dimensions.height,
                    output = %variant_key,
                    "Generated variant"
                );
                Ok(url_for(&self.public_base_url, &variant_key))
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Variant rendering failed, using original");
                Ok(url.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::resizer::sample_png;

    const BASE: &str = "http://localhost:8080/media";

    async fn provider(dir: &tempfile::TempDir, limits: UploadLimits) -> LocalObjectStorage {
        LocalObjectStorage::new(
            dir.path().to_str().unwrap(),
            BASE,
            limits,
            VariantResizer::new("_variants"),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_exists_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir, UploadLimits::unlimited()).await;

        let stored = storage
            .upload(Bytes::from("hello"), "root/hello.txt", Some("text/plain"))
            .await
            .unwrap();
        assert!(stored.url.starts_with(BASE));
        assert!(storage.exists(&stored.url).await.unwrap());

        assert_eq!(storage.delete(&stored.url).await.unwrap(), DeleteOutcome::Deleted);
        assert!(!storage.exists(&stored.url).await.unwrap());
        assert_eq!(storage.delete(&stored.url).await.unwrap(), DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_upload_enforces_limits() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir, UploadLimits::default()).await;

        let err = storage
            .upload(Bytes::from("%PDF"), "root/doc.pdf", Some("application/pdf"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Upload));
    }

    #[tokio::test]
    async fn test_foreign_url_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir, UploadLimits::unlimited()).await;
        assert_eq!(
            storage.delete("https://cdn.example.com/x.jpg").await.unwrap(),
            DeleteOutcome::NotFound
        );
        assert_eq!(
            storage
                .resize("https://cdn.example.com/x.jpg", Dimensions::square(64))
                .await
                .unwrap(),
            "https://cdn.example.com/x.jpg"
        );
    }

    #[tokio::test]
    async fn test_resize_writes_and_reuses_variant() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir, UploadLimits::default()).await;
        let stored = storage
            .upload(sample_png(300, 300), "root/red.png", Some("image/png"))
            .await
            .unwrap();

        let variant = storage.resize(&stored.url, Dimensions::square(64)).await.unwrap();
        assert_ne!(variant, stored.url);
        assert!(variant.contains("/_variants/64x64/"));
        assert!(storage.exists(&variant).await.unwrap());

        let again = storage.resize(&stored.url, Dimensions::square(64)).await.unwrap();
        assert_eq!(again, variant);

        storage.delete(&stored.url).await.unwrap();
        assert!(!storage.exists(&variant).await.unwrap());
    }

    #[tokio::test]
    async fn test_resize_falls_back_for_undecodable_source() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir, UploadLimits::unlimited()).await;
        let stored = storage
            .upload(Bytes::from("not really"), "root/fake.png", Some("image/png"))
            .await
            .unwrap();
        let url = storage.resize(&stored.url, Dimensions::square(32)).await.unwrap();
        assert_eq!(url, stored.url);
    }
}
