//! Folder and file CRUD.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use medialib_core::config::library::LibraryConfig;
use medialib_core::error::AppError;
use medialib_core::events::{AssetEvent, DomainEvent};
use medialib_core::result::AppResult;
use medialib_core::traits::storage::ObjectStorage;
use medialib_core::types::AssetId;
use medialib_database::repositories::{AssetRepository, CreditRepository};
use medialib_database::{ChangeFeed, Repositories};
use medialib_entity::asset::{AssetPatch, CreateAsset, ParentRef, VirtualAsset};

use crate::asset::credit::CreditCache;
use crate::context::RequestContext;
use crate::guard::InFlightGuard;

/// Manages the virtual folder/file tree over a metadata repository and an
/// object storage.
#[derive(Debug, Clone)]
pub struct AssetStore {
    /// Asset metadata.
    pub(crate) assets: Arc<dyn AssetRepository>,
    /// URL-keyed credits.
    pub(crate) credits: Arc<dyn CreditRepository>,
    /// Blob storage.
    pub(crate) storage: Arc<dyn ObjectStorage>,
    /// Change feed for live subscriptions.
    pub(crate) feed: ChangeFeed,
    /// Effective-credit cache.
    pub(crate) credit_cache: CreditCache,
    /// Per-asset mutation guard.
    pub(crate) guard: InFlightGuard,
}

impl AssetStore {
    /// Creates a new asset store.
    pub fn new(
        repos: &Repositories,
        storage: Arc<dyn ObjectStorage>,
        feed: ChangeFeed,
        config: &LibraryConfig,
    ) -> Self {
        Self {
            assets: Arc::clone(&repos.assets),
            credits: Arc::clone(&repos.credits),
            storage,
            feed,
            credit_cache: CreditCache::new(
                config.credit_cache_capacity,
                config.credit_cache_ttl_seconds,
            ),
            guard: InFlightGuard::new(),
        }
    }

    /// The change feed this store publishes on.
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// The object storage behind this store.
    pub fn storage(&self) -> &Arc<dyn ObjectStorage> {
        &self.storage
    }

    pub(crate) fn publish(&self, ctx: &RequestContext, event: AssetEvent) {
        self.feed.publish(DomainEvent::asset(ctx.actor(), event));
    }

    /// Lists the active direct children of `parent`.
    ///
    /// Folders come first, newest first within each kind.
    pub async fn list(&self, _ctx: &RequestContext, parent: ParentRef) -> AppResult<Vec<VirtualAsset>> {
        if let ParentRef::Folder(id) = parent {
            self.require_active_folder(id).await?;
        }
        self.assets.find_children(parent).await
    }

    /// Case-insensitive name search across every active asset.
    pub async fn search_all(&self, _ctx: &RequestContext, term: &str) -> AppResult<Vec<VirtualAsset>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.assets.search_active_by_name(term).await
    }

    /// Gets an active asset by id.
    pub async fn get(&self, _ctx: &RequestContext, id: AssetId) -> AppResult<VirtualAsset> {
        self.require_active(id).await
    }

    /// Gets an asset by id, trashed or not.
    pub async fn get_any(&self, _ctx: &RequestContext, id: AssetId) -> AppResult<VirtualAsset> {
        self.assets
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Asset {id} not found")))
    }

    /// Creates a folder under `parent`.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent: ParentRef,
    ) -> AppResult<VirtualAsset> {
        ctx.require_admin("create folders")?;
        let name = validate_name(name, "Folder")?;
        self.require_folder_parent(parent).await?;

        let folder = self.assets.create(&CreateAsset::folder(name, parent)).await?;

        info!(asset_id = %folder.id, parent = %parent, name = %folder.name, "Folder created");
        self.publish(
            ctx,
            AssetEvent::FolderCreated {
                asset_id: folder.id,
                parent_id: folder.parent_id,
                name: folder.name.clone(),
            },
        );
        Ok(folder)
    }

    /// Uploads bytes and records them as a file under `parent`.
    ///
    /// A supplied credit is written both to the URL-keyed lookup and to the
    /// row's legacy field. If the row cannot be created the uploaded blob is
    /// removed again.
    pub async fn upload_file(
        &self,
        ctx: &RequestContext,
        data: Bytes,
        parent: ParentRef,
        file_name: &str,
        content_type: Option<&str>,
        credit: Option<&str>,
    ) -> AppResult<VirtualAsset> {
        ctx.require_admin("upload files")?;
        let file_name = validate_name(file_name, "File")?;
        self.require_folder_parent(parent).await?;

        let hint = format!("{parent}/{file_name}");
        let stored = self.storage.upload(data, &hint, content_type).await?;

        let credit = credit
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let data = CreateAsset::file(file_name, parent, stored.url.clone(), credit.clone());
        let file = match self.assets.create(&data).await {
            Ok(file) => file,
            Err(e) => {
                self.discard_upload(&stored.url, None).await;
                return Err(e);
            }
        };

        if let Some(credit) = &credit {
            if let Err(e) = self.credits.upsert(&stored.url, credit).await {
                self.discard_upload(&stored.url, Some(file.id)).await;
                return Err(e);
            }
            self.credit_cache.invalidate(&stored.url).await;
        }

        info!(
            asset_id = %file.id,
            parent = %parent,
            url = %stored.url,
            size_bytes = stored.size_bytes,
            "File uploaded"
        );
        self.publish(
            ctx,
            AssetEvent::FileUploaded {
                asset_id: file.id,
                parent_id: file.parent_id,
                url: stored.url,
            },
        );
        Ok(file)
    }

    /// Renames an active asset. Only the name changes.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        id: AssetId,
        new_name: &str,
    ) -> AppResult<VirtualAsset> {
        ctx.require_admin("rename assets")?;
        let _permit = self.guard.acquire(id, "rename")?;
        let name = validate_name(new_name, "Asset")?;
        self.require_active(id).await?;

        let asset = self.assets.update(id, &AssetPatch::rename(name)).await?;

        info!(asset_id = %id, name = %asset.name, "Asset renamed");
        self.publish(
            ctx,
            AssetEvent::Renamed {
                asset_id: id,
                parent_id: asset.parent_id,
                name: asset.name.clone(),
            },
        );
        Ok(asset)
    }

    /// Moves an active asset under a new parent.
    ///
    /// Moving a folder into itself or into one of its own descendants fails
    /// with `Validation`. Moving to the current parent changes nothing.
    pub async fn move_asset(
        &self,
        ctx: &RequestContext,
        id: AssetId,
        new_parent: ParentRef,
    ) -> AppResult<VirtualAsset> {
        ctx.require_admin("move assets")?;
        let _permit = self.guard.acquire(id, "move")?;
        let asset = self.require_active(id).await?;

        if let ParentRef::Folder(target) = new_parent {
            if target == id {
                return Err(AppError::validation("Cannot move an asset into itself"));
            }
            self.require_folder_parent(new_parent).await?;
            if self.is_ancestor(id, target).await? {
                return Err(AppError::validation(
                    "Cannot move a folder into one of its own descendants",
                ));
            }
        }

        if asset.parent() == new_parent {
            return Ok(asset);
        }

        let from_parent_id = asset.parent_id;
        let moved = self.assets.update(id, &AssetPatch::reparent(new_parent)).await?;

        info!(asset_id = %id, to = %new_parent, "Asset moved");
        self.publish(
            ctx,
            AssetEvent::Moved {
                asset_id: id,
                from_parent_id,
                to_parent_id: moved.parent_id,
            },
        );
        Ok(moved)
    }

    /// Undo a half-finished upload: drop the row if one was written, then the blob.
    async fn discard_upload(&self, url: &str, row: Option<AssetId>) {
        if let Some(id) = row {
            if let Err(cleanup) = self.assets.delete(id).await {
                warn!(asset_id = %id, error = %cleanup, "Failed to remove row of failed upload");
            }
        }
        if let Err(cleanup) = self.storage.delete(url).await {
            warn!(url, error = %cleanup, "Failed to remove orphaned upload");
        }
    }

    /// Whether `ancestor` appears on the parent chain of `node` (inclusive).
    pub(crate) async fn is_ancestor(&self, ancestor: AssetId, node: AssetId) -> AppResult<bool> {
        let mut seen = HashSet::new();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            if !seen.insert(id) {
                return Err(AppError::internal(format!(
                    "Parent chain of {node} loops at {id}"
                )));
            }
            current = self.assets.find_by_id(id).await?.and_then(|a| a.parent_id);
        }
        Ok(false)
    }

    pub(crate) async fn require_active(&self, id: AssetId) -> AppResult<VirtualAsset> {
        self.assets
            .find_by_id(id)
            .await?
            .filter(VirtualAsset::is_active)
            .ok_or_else(|| AppError::not_found(format!("Asset {id} not found")))
    }

    pub(crate) async fn require_active_folder(&self, id: AssetId) -> AppResult<VirtualAsset> {
        let asset = self.require_active(id).await?;
        if asset.is_folder() {
            Ok(asset)
        } else {
            Err(AppError::not_found(format!("Folder {id} not found")))
        }
    }

    /// The top level, or an active folder. A file as parent is a validation error.
    async fn require_folder_parent(&self, parent: ParentRef) -> AppResult<()> {
        let ParentRef::Folder(id) = parent else {
            return Ok(());
        };
        let asset = self
            .require_active(id)
            .await
            .map_err(|_| AppError::not_found(format!("Parent folder {id} not found")))?;
        if asset.is_folder() {
            Ok(())
        } else {
            Err(AppError::validation(format!("Asset {id} is a file, not a folder")))
        }
    }
}

fn validate_name(name: &str, what: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{what} name cannot be empty")));
    }
    Ok(trimmed.to_string())
}
