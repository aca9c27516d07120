//! Slash-separated folder path resolution.

use tracing::debug;

use medialib_core::result::AppResult;
use medialib_entity::asset::ParentRef;

use crate::asset::store::AssetStore;
use crate::context::RequestContext;

impl AssetStore {
    /// Resolve `path` to a folder, creating missing segments.
    ///
    /// Empty segments are ignored and an empty path is the top level. When
    /// several active folders share a segment name, the oldest one wins.
    /// Creating a segment requires the admin role.
    pub async fn resolve_folder_by_path(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> AppResult<ParentRef> {
        let mut current = ParentRef::Root;
        for segment in path.split('/').map(str::trim).filter(|s| !s.is_empty()) {
            let existing = self
                .assets
                .find_children(current)
                .await?
                .into_iter()
                .filter(|asset| asset.is_folder() && asset.name == segment)
                .min_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

            current = match existing {
                Some(folder) => ParentRef::Folder(folder.id),
                None => {
                    let created = self.create_folder(ctx, segment, current).await?;
                    debug!(asset_id = %created.id, segment, "Created folder for path segment");
                    ParentRef::Folder(created.id)
                }
            };
        }
        Ok(current)
    }
}
