//! In-memory asset collection.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use medialib_core::error::AppError;
use medialib_core::result::AppResult;
use medialib_core::types::AssetId;
use medialib_entity::asset::{AssetPatch, CreateAsset, ParentRef, VirtualAsset, sort_for_listing};

use crate::repositories::AssetRepository;

/// Asset collection held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetRepository {
    assets: Arc<RwLock<HashMap<AssetId, VirtualAsset>>>,
}

impl MemoryAssetRepository {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, trashed included.
    pub async fn len(&self) -> usize {
        self.assets.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.assets.read().await.is_empty()
    }

    async fn collect<F>(&self, filter: F) -> Vec<VirtualAsset>
    where
        F: Fn(&VirtualAsset) -> bool,
    {
        let assets = self.assets.read().await;
        let mut items: Vec<VirtualAsset> = assets.values().filter(|a| filter(a)).cloned().collect();
        sort_for_listing(&mut items);
        items
    }
}

#[async_trait]
impl AssetRepository for MemoryAssetRepository {
    async fn find_by_id(&self, id: AssetId) -> AppResult<Option<VirtualAsset>> {
        Ok(self.assets.read().await.get(&id).cloned())
    }

    async fn find_children(&self, parent: ParentRef) -> AppResult<Vec<VirtualAsset>> {
        let parent_id = parent.folder_id();
        Ok(self
            .collect(|a| a.parent_id == parent_id && a.is_active())
            .await)
    }

    async fn find_all_children(&self, parent: ParentRef) -> AppResult<Vec<VirtualAsset>> {
        let parent_id = parent.folder_id();
        Ok(self.collect(|a| a.parent_id == parent_id).await)
    }

    async fn find_active(&self) -> AppResult<Vec<VirtualAsset>> {
        Ok(self.collect(VirtualAsset::is_active).await)
    }

    async fn find_trashed(&self) -> AppResult<Vec<VirtualAsset>> {
        let mut items = self.collect(VirtualAsset::is_trashed).await;
        items.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at).then_with(|| b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn search_active_by_name(&self, term: &str) -> AppResult<Vec<VirtualAsset>> {
        let needle = term.to_lowercase();
        Ok(self
            .collect(|a| a.is_active() && a.name.to_lowercase().contains(&needle))
            .await)
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Vec<VirtualAsset>> {
        Ok(self.collect(|a| a.url.as_deref() == Some(url)).await)
    }

    async fn create(&self, data: &CreateAsset) -> AppResult<VirtualAsset> {
        let asset = data.clone().into_asset(AssetId::new(), Utc::now());
        self.assets.write().await.insert(asset.id, asset.clone());
        Ok(asset)
    }

    async fn update(&self, id: AssetId, patch: &AssetPatch) -> AppResult<VirtualAsset> {
        let mut assets = self.assets.write().await;
        let asset = assets
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Asset {id} not found")))?;
        patch.apply(asset, Utc::now());
        Ok(asset.clone())
    }

    async fn delete(&self, id: AssetId) -> AppResult<bool> {
        Ok(self.assets.write().await.remove(&id).is_some())
    }
}
