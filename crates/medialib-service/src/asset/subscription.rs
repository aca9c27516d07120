//! Live folder listings and single-asset watches.
//!
//! Both streams start with a fresh snapshot and re-read the repository
//! whenever the change feed reports a relevant mutation. A subscriber that
//! lags behind the feed re-reads as well, so it always converges on what a
//! one-shot read would return.

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use medialib_core::events::DomainEvent;
use medialib_core::result::AppResult;
use medialib_core::types::AssetId;
use medialib_entity::asset::{ParentRef, VirtualAsset};

use crate::asset::store::AssetStore;
use crate::context::RequestContext;

/// Snapshots of a folder listing.
pub type FolderStream = BoxStream<'static, AppResult<Vec<VirtualAsset>>>;

/// Snapshots of one asset; `None` while it is trashed or once it is purged.
pub type AssetStream = BoxStream<'static, AppResult<Option<VirtualAsset>>>;

struct Watch<K> {
    store: AssetStore,
    ctx: RequestContext,
    key: K,
    events: Receiver<DomainEvent>,
    primed: bool,
    done: bool,
}

/// Wait for the next event `relevant` accepts. `false` once the feed closes.
async fn next_change<F>(events: &mut Receiver<DomainEvent>, relevant: F) -> bool
where
    F: Fn(&DomainEvent) -> bool,
{
    loop {
        match events.recv().await {
            Ok(event) if relevant(&event) => return true,
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "Subscriber lagged, re-reading");
                return true;
            }
            Err(RecvError::Closed) => return false,
        }
    }
}

impl AssetStore {
    /// Stream the listing of `parent`, re-emitted after every change to it.
    ///
    /// Fails up front if `parent` is not an active folder. The stream ends
    /// after yielding an error, e.g. once the folder has been purged.
    pub async fn subscribe_folder(
        &self,
        ctx: &RequestContext,
        parent: ParentRef,
    ) -> AppResult<FolderStream> {
        let events = self.feed.subscribe();
        let initial = self.list(ctx, parent).await?;

        let watch = Watch {
            store: self.clone(),
            ctx: ctx.clone(),
            key: parent,
            events,
            primed: false,
            done: false,
        };
        let stream = stream::unfold((watch, Some(initial)), |(mut watch, initial)| async move {
            if watch.done {
                return None;
            }
            if !watch.primed {
                watch.primed = true;
                return initial.map(|snapshot| (Ok(snapshot), (watch, None)));
            }

            let folder = watch.key.folder_id();
            let changed = next_change(&mut watch.events, |event| {
                event.as_asset().is_some_and(|e| {
                    e.touches_folder(folder) || (folder.is_some() && e.asset_id() == folder)
                })
            })
            .await;
            if !changed {
                return None;
            }

            let snapshot = watch.store.list(&watch.ctx, watch.key).await;
            watch.done = snapshot.is_err();
            Some((snapshot, (watch, None)))
        });
        Ok(stream.boxed())
    }

    /// Stream one asset, re-emitted after every change to it.
    ///
    /// Yields `None` while the asset is trashed; ends after `None` once the
    /// row is gone for good.
    pub async fn watch_asset(&self, ctx: &RequestContext, id: AssetId) -> AppResult<AssetStream> {
        let events = self.feed.subscribe();
        let watch = Watch {
            store: self.clone(),
            ctx: ctx.clone(),
            key: id,
            events,
            primed: false,
            done: false,
        };

        let stream = stream::unfold(watch, |mut watch| async move {
            if watch.done {
                return None;
            }
            if watch.primed {
                let id = watch.key;
                let changed = next_change(&mut watch.events, |event| {
                    event.as_asset().is_some_and(|e| e.asset_id() == Some(id))
                })
                .await;
                if !changed {
                    return None;
                }
            }
            watch.primed = true;

            let snapshot = match watch.store.assets.find_by_id(watch.key).await {
                Ok(Some(asset)) => Ok(Some(asset).filter(VirtualAsset::is_active)),
                Ok(None) => {
                    watch.done = true;
                    Ok(None)
                }
                Err(e) => {
                    watch.done = true;
                    Err(e)
                }
            };
            Some((snapshot, watch))
        });
        Ok(stream.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::testing::{admin, store, upload};
    use futures::StreamExt;

    #[tokio::test]
    async fn test_folder_subscription_sees_upload_and_trash() {
        let (store, _) = store();
        let ctx = admin();
        let folder = store.create_folder(&ctx, "Live", ParentRef::Root).await.unwrap();
        let parent = ParentRef::Folder(folder.id);

        let mut updates = store.subscribe_folder(&ctx, parent).await.unwrap();
        assert!(updates.next().await.unwrap().unwrap().is_empty());

        let file = upload(&store, parent, "a.jpg").await;
        let snapshot = updates.next().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, file.id);

        store.soft_delete(&ctx, file.id).await.unwrap();
        assert!(updates.next().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watch_asset_ends_after_purge() {
        let (store, _) = store();
        let ctx = admin();
        let file = upload(&store, ParentRef::Root, "a.jpg").await;

        let mut watch = store.watch_asset(&ctx, file.id).await.unwrap();
        assert!(watch.next().await.unwrap().unwrap().is_some());

        store.rename(&ctx, file.id, "b.jpg").await.unwrap();
        let renamed = watch.next().await.unwrap().unwrap().unwrap();
        assert_eq!(renamed.name, "b.jpg");

        store.hard_delete(&ctx, file.id).await.unwrap();
        assert!(watch.next().await.unwrap().unwrap().is_none());
        assert!(watch.next().await.is_none());
    }
}
