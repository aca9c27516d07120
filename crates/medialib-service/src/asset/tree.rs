//! Folder tree views and breadcrumbs.

use std::collections::HashMap;

use medialib_core::error::AppError;
use medialib_core::result::AppResult;
use medialib_core::types::AssetId;
use medialib_entity::asset::{AssetNode, ParentRef, VirtualAsset, sort_for_listing};

use crate::asset::store::AssetStore;
use crate::context::RequestContext;

impl AssetStore {
    /// Builds the tree of active folders below `parent`, with counts.
    pub async fn tree(&self, _ctx: &RequestContext, parent: ParentRef) -> AppResult<AssetNode> {
        let (id, name) = match parent {
            ParentRef::Root => (None, "root".to_string()),
            ParentRef::Folder(id) => {
                let folder = self.require_active_folder(id).await?;
                (Some(folder.id), folder.name)
            }
        };

        let mut by_parent: HashMap<Option<AssetId>, Vec<VirtualAsset>> = HashMap::new();
        for asset in self.assets.find_active().await? {
            by_parent.entry(asset.parent_id).or_default().push(asset);
        }
        for children in by_parent.values_mut() {
            sort_for_listing(children);
        }

        Ok(build_tree(id, name, &by_parent))
    }

    /// Ancestor chain of `folder`, top level first, ending with the folder itself.
    pub async fn breadcrumbs(&self, _ctx: &RequestContext, folder: AssetId) -> AppResult<Vec<VirtualAsset>> {
        let mut chain = vec![self.require_active_folder(folder).await?];
        while let Some(parent_id) = chain.last().and_then(|a| a.parent_id) {
            if chain.iter().any(|a| a.id == parent_id) {
                return Err(AppError::internal(format!(
                    "Parent chain of {folder} loops at {parent_id}"
                )));
            }
            let parent = self
                .assets
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Ancestor {parent_id} not found")))?;
            chain.push(parent);
        }
        chain.reverse();
        Ok(chain)
    }
}

/// Builds a node from the active assets grouped by parent.
fn build_tree(
    id: Option<AssetId>,
    name: String,
    by_parent: &HashMap<Option<AssetId>, Vec<VirtualAsset>>,
) -> AssetNode {
    let entries = by_parent.get(&id).map(Vec::as_slice).unwrap_or_default();
    let children: Vec<AssetNode> = entries
        .iter()
        .filter(|a| a.is_folder())
        .map(|folder| build_tree(Some(folder.id), folder.name.clone(), by_parent))
        .collect();

    AssetNode {
        id,
        name,
        child_count: children.len() as u64,
        file_count: entries.iter().filter(|a| a.is_file()).count() as u64,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::testing::{admin, store, upload};

    #[tokio::test]
    async fn test_tree_counts_skip_trashed() {
        let (store, _) = store();
        let ctx = admin();
        let a = store.create_folder(&ctx, "A", ParentRef::Root).await.unwrap();
        let b = store.create_folder(&ctx, "B", ParentRef::Folder(a.id)).await.unwrap();
        upload(&store, ParentRef::Folder(a.id), "1.jpg").await;
        let gone = upload(&store, ParentRef::Folder(a.id), "2.jpg").await;
        upload(&store, ParentRef::Folder(b.id), "3.jpg").await;
        store.soft_delete(&ctx, gone.id).await.unwrap();

        let tree = store.tree(&ctx, ParentRef::Root).await.unwrap();
        assert_eq!(tree.child_count, 1);
        assert_eq!(tree.total_folders(), 2);
        assert_eq!(tree.total_files(), 2);
        assert_eq!(tree.children[0].file_count, 1);
    }

    #[tokio::test]
    async fn test_breadcrumbs_root_first() {
        let (store, _) = store();
        let ctx = admin();
        let a = store.create_folder(&ctx, "A", ParentRef::Root).await.unwrap();
        let b = store.create_folder(&ctx, "B", ParentRef::Folder(a.id)).await.unwrap();

        let names: Vec<String> = store
            .breadcrumbs(&ctx, b.id)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
