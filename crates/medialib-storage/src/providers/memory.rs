//! In-memory object storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

use medialib_core::result::AppResult;
use medialib_core::traits::storage::{DeleteOutcome, ObjectStorage, StoredObject};

use crate::keys::{key_for, object_key, url_for};
use crate::limits::UploadLimits;

/// Keeps blobs in a process-local map. Resizing always returns the original URL.
#[derive(Debug, Clone)]
pub struct MemoryObjectStorage {
    public_base_url: String,
    limits: UploadLimits,
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryObjectStorage {
    /// Create an empty store addressing objects below `public_base_url`.
    pub fn new(public_base_url: &str, limits: UploadLimits) -> Self {
        Self {
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            limits,
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Bytes stored under `url`, if any.
    pub async fn get(&self, url: &str) -> Option<Bytes> {
        let key = key_for(&self.public_base_url, url)?;
        self.objects.read().await.get(key).cloned()
    }
}

impl Default for MemoryObjectStorage {
    fn default() -> Self {
        Self::new("memory://media", UploadLimits::unlimited())
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
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
        self.objects.write().await.insert(key.clone(), data);
        debug!(key = %key, bytes = size_bytes, "Stored object in memory");

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
        Ok(match self.objects.write().await.remove(key) {
            Some(_) => DeleteOutcome::Deleted,
            None => DeleteOutcome::NotFound,
        })
    }

    async fn exists(&self, url: &str) -> AppResult<bool> {
        Ok(self.get(url).await.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medialib_core::traits::storage::Dimensions;

    #[tokio::test]
    async fn test_memory_round_trip() {
        let storage = MemoryObjectStorage::default();
        let stored = storage
            .upload(Bytes::from("abc"), "root/a.jpg", Some("image/jpeg"))
            .await
            .unwrap();
        assert_eq!(storage.get(&stored.url).await, Some(Bytes::from("abc")));
        assert_eq!(
            storage.resize(&stored.url, Dimensions::square(10)).await.unwrap(),
            stored.url
        );
        assert_eq!(storage.delete(&stored.url).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(storage.object_count().await, 0);
    }
}
