//! Trash lifecycle: soft delete, restore, and permanent deletion.
//!
//! Trashing marks only the target row. Descendants of a trashed folder keep
//! their own state and simply become unreachable until the folder is
//! restored. Permanent deletion removes the blob before the row and cascades
//! through folders children-first.

use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use medialib_core::error::{AppError, ErrorKind};
use medialib_core::events::AssetEvent;
use medialib_core::result::AppResult;
use medialib_core::traits::storage::DeleteOutcome;
use medialib_core::types::AssetId;
use medialib_entity::asset::{AssetPatch, ParentRef, VirtualAsset};

use crate::asset::store::AssetStore;
use crate::context::RequestContext;

/// Outcome of emptying the trash.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PurgeReport {
    /// Every row removed, descendants included.
    pub purged: Vec<AssetId>,
    /// Trashed items that could not be removed, with the reason.
    pub failed: Vec<(AssetId, String)>,
}

impl AssetStore {
    /// Moves an asset to the trash. Already trashed assets are left as they are.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: AssetId) -> AppResult<VirtualAsset> {
        ctx.require_admin("trash assets")?;
        let _permit = self.guard.acquire(id, "soft delete")?;
        let asset = self.get_any(ctx, id).await?;
        if asset.is_trashed() {
            return Ok(asset);
        }

        let trashed = self.assets.update(id, &AssetPatch::trash(Utc::now())).await?;

        info!(asset_id = %id, "Asset moved to trash");
        self.publish(
            ctx,
            AssetEvent::Trashed {
                asset_id: id,
                parent_id: trashed.parent_id,
            },
        );
        Ok(trashed)
    }

    /// Takes an asset out of the trash.
    ///
    /// If its former parent has been purged meanwhile, the asset lands at the
    /// top level instead.
    pub async fn restore(&self, ctx: &RequestContext, id: AssetId) -> AppResult<VirtualAsset> {
        ctx.require_admin("restore assets")?;
        let _permit = self.guard.acquire(id, "restore")?;
        let asset = self.get_any(ctx, id).await?;
        if asset.is_active() {
            return Ok(asset);
        }

        let relocate = match asset.parent_id {
            Some(parent_id) if self.assets.find_by_id(parent_id).await?.is_none() => {
                warn!(asset_id = %id, parent_id = %parent_id, "Former parent is gone, restoring to root");
                Some(ParentRef::Root)
            }
            _ => None,
        };
        let restored = self.assets.update(id, &AssetPatch::restore(relocate)).await?;

        info!(asset_id = %id, parent = %restored.parent(), "Asset restored");
        self.publish(
            ctx,
            AssetEvent::Restored {
                asset_id: id,
                parent_id: restored.parent_id,
            },
        );
        Ok(restored)
    }

    /// Every trashed asset, most recently trashed first.
    pub async fn list_trash(&self, _ctx: &RequestContext) -> AppResult<Vec<VirtualAsset>> {
        self.assets.find_trashed().await
    }

    /// Every descendant of `folder`, trashed or not, parents before children.
    pub async fn list_all_descendants(&self, folder: AssetId) -> AppResult<Vec<VirtualAsset>> {
        let mut out = Vec::new();
        let mut frontier = vec![folder];
        while let Some(parent) = frontier.pop() {
            for child in self.assets.find_all_children(ParentRef::Folder(parent)).await? {
                if child.is_folder() {
                    frontier.push(child.id);
                }
                out.push(child);
            }
        }
        Ok(out)
    }

    /// Permanently deletes an asset, trashed or not.
    ///
    /// Returns the removed ids, children before the target.
    pub async fn hard_delete(&self, ctx: &RequestContext, id: AssetId) -> AppResult<Vec<AssetId>> {
        self.hard_delete_with_cancel(ctx, id, &CancellationToken::new()).await
    }

    /// [`hard_delete`](Self::hard_delete) that stops between nodes once
    /// `cancel` fires. A cancelled cascade never removes the target row.
    pub async fn hard_delete_with_cancel(
        &self,
        ctx: &RequestContext,
        id: AssetId,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<AssetId>> {
        ctx.require_admin("permanently delete assets")?;
        let _permit = self.guard.acquire(id, "hard delete")?;
        let target = self.get_any(ctx, id).await?;

        let mut purged = Vec::new();
        if target.is_folder() {
            let descendants = self.list_all_descendants(id).await?;
            let total = descendants.len();
            for (done, node) in descendants.iter().rev().enumerate() {
                if cancel.is_cancelled() {
                    warn!(asset_id = %id, done, total, "Cascade cancelled");
                    return Err(AppError::cancelled(format!(
                        "Deletion of folder {id} cancelled after {done} of {total} descendants"
                    )));
                }
                self.purge_node(ctx, node).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Deletion,
                        format!("Failed to delete {} inside folder {id}; folder kept", node.id),
                        e,
                    )
                })?;
                purged.push(node.id);
            }
            if cancel.is_cancelled() {
                return Err(AppError::cancelled(format!(
                    "Deletion of folder {id} cancelled after {total} of {total} descendants"
                )));
            }
        }

        self.purge_node(ctx, &target).await?;
        purged.push(id);

        info!(asset_id = %id, removed = purged.len(), "Asset permanently deleted");
        Ok(purged)
    }

    /// Hard-deletes every trashed asset.
    ///
    /// Failures are collected and do not stop the remaining items.
    pub async fn empty_trash(&self, ctx: &RequestContext) -> AppResult<PurgeReport> {
        ctx.require_admin("empty the trash")?;
        let mut report = PurgeReport::default();
        for item in self.list_trash(ctx).await? {
            if report.purged.contains(&item.id) {
                continue;
            }
            if self.assets.find_by_id(item.id).await?.is_none() {
                continue;
            }
            let subtree = if item.is_folder() {
                self.list_all_descendants(item.id).await?
            } else {
                Vec::new()
            };
            match self.hard_delete(ctx, item.id).await {
                Ok(ids) => report.purged.extend(ids),
                Err(e) => {
                    // A cascade stops at the first failure; count what it already removed.
                    for node in &subtree {
                        if self.assets.find_by_id(node.id).await?.is_none() {
                            report.purged.push(node.id);
                        }
                    }
                    report.failed.push((item.id, e.to_string()));
                }
            }
        }
        info!(
            purged = report.purged.len(),
            failed = report.failed.len(),
            "Trash emptied"
        );
        Ok(report)
    }

    /// Remove one row, deleting its blob first when no other row shares it.
    async fn purge_node(&self, ctx: &RequestContext, asset: &VirtualAsset) -> AppResult<()> {
        if let Some(url) = asset.url.as_deref() {
            let shared = self
                .assets
                .find_by_url(url)
                .await?
                .iter()
                .any(|other| other.id != asset.id);
            if shared {
                info!(asset_id = %asset.id, url, "Blob still referenced, keeping it");
            } else {
                match self.storage.delete(url).await {
                    Ok(DeleteOutcome::Deleted) => {}
                    Ok(DeleteOutcome::NotFound) => {
                        warn!(asset_id = %asset.id, url, "Blob already gone");
                    }
                    Err(e) => {
                        return Err(AppError::with_source(
                            ErrorKind::Deletion,
                            format!("Failed to delete blob for {}", asset.id),
                            e,
                        ));
                    }
                }
            }
            self.credit_cache.invalidate(url).await;
        }

        self.assets.delete(asset.id).await?;
        self.publish(
            ctx,
            AssetEvent::Purged {
                asset_id: asset.id,
                parent_id: asset.parent_id,
            },
        );
        Ok(())
    }
}
