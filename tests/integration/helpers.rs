//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use medialib_core::config::library::LibraryConfig;
use medialib_core::error::AppError;
use medialib_core::result::AppResult;
use medialib_core::traits::storage::{DeleteOutcome, ObjectStorage, StoredObject};
use medialib_database::{ChangeFeed, Repositories};
use medialib_entity::asset::{ParentRef, VirtualAsset};
use medialib_service::{ArticleEditor, AssetStore, RequestContext};
use medialib_storage::MemoryObjectStorage;

/// Object storage that can be told to fail or to trip a cancellation.
#[derive(Debug, Default)]
pub struct ScriptedStorage {
    inner: MemoryObjectStorage,
    failing_deletes: Mutex<HashSet<String>>,
    deletes: AtomicUsize,
    cancel_after: Mutex<Option<(usize, CancellationToken)>>,
    held: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl ScriptedStorage {
    /// Make deletion of `url` fail with a storage error.
    pub fn fail_delete_of(&self, url: &str) {
        if let Ok(mut failing) = self.failing_deletes.lock() {
            failing.insert(url.to_string());
        }
    }

    /// Cancel `token` once `count` blobs have been deleted.
    pub fn cancel_after_deletes(&self, count: usize, token: CancellationToken) {
        if let Ok(mut slot) = self.cancel_after.lock() {
            *slot = Some((count, token));
        }
    }

    /// Park the next delete until [`release`](Self::release) is called.
    pub fn hold_deletes(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Wait until a held delete has started.
    pub async fn delete_started(&self) {
        self.entered.notified().await;
    }

    /// Let a held delete continue.
    pub fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.release.notify_one();
    }

    /// Whether a blob is stored under `url`.
    pub async fn holds(&self, url: &str) -> bool {
        self.inner.get(url).await.is_some()
    }

    /// Number of stored blobs.
    pub async fn blob_count(&self) -> usize {
        self.inner.object_count().await
    }
}

#[async_trait]
impl ObjectStorage for ScriptedStorage {
    fn provider_type(&self) -> &str {
        "scripted"
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
        self.inner.upload(data, destination_hint, content_type).await
    }

    async fn delete(&self, url: &str) -> AppResult<DeleteOutcome> {
        if self.held.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }

        let fail = self
            .failing_deletes
            .lock()
            .map(|failing| failing.contains(url))
            .unwrap_or(false);
        if fail {
            return Err(AppError::storage(format!("Injected failure deleting {url}")));
        }

        let outcome = self.inner.delete(url).await?;
        let done = self.deletes.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(slot) = self.cancel_after.lock() {
            if let Some((count, token)) = slot.as_ref() {
                if done >= *count {
                    token.cancel();
                }
            }
        }
        Ok(outcome)
    }

    async fn exists(&self, url: &str) -> AppResult<bool> {
        self.inner.exists(url).await
    }
}

/// Test application context
pub struct TestApp {
    /// Repositories behind the store
    pub repos: Repositories,
    /// Scriptable blob storage
    pub storage: Arc<ScriptedStorage>,
    /// The asset store under test
    pub store: AssetStore,
    /// The article editor under test
    pub editor: ArticleEditor,
    /// Admin context
    pub admin: RequestContext,
}

impl TestApp {
    /// Create a new test application over in-memory backends
    pub fn new() -> Self {
        let repos = Repositories::memory();
        let storage = Arc::new(ScriptedStorage::default());
        let store = AssetStore::new(
            &repos,
            storage.clone(),
            ChangeFeed::new(64),
            &LibraryConfig::default(),
        );
        let editor = ArticleEditor::new(repos.articles.clone(), store.clone());
        Self {
            repos,
            storage,
            store,
            editor,
            admin: RequestContext::admin("admin"),
        }
    }

    /// Create a folder as admin
    pub async fn folder(&self, name: &str, parent: ParentRef) -> VirtualAsset {
        self.store
            .create_folder(&self.admin, name, parent)
            .await
            .expect("create folder")
    }

    /// Upload a small image as admin
    pub async fn file(&self, name: &str, parent: ParentRef) -> VirtualAsset {
        self.store
            .upload_file(
                &self.admin,
                Bytes::from(format!("bytes of {name}")),
                parent,
                name,
                Some("image/jpeg"),
                None,
            )
            .await
            .expect("upload file")
    }

    /// Names of the active children of `parent`, in listing order
    pub async fn names(&self, parent: ParentRef) -> Vec<String> {
        self.store
            .list(&self.admin, parent)
            .await
            .expect("list")
            .into_iter()
            .map(|a| a.name)
            .collect()
    }
}
