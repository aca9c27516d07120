//! Credit resolution.
//!
//! A credit belongs to a blob URL, not to an asset row: every asset that
//! references the same URL shows the same attribution. The URL-keyed lookup
//! is authoritative; the per-row `credit` field is a legacy fallback.

use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, info};

use medialib_core::error::AppError;
use medialib_core::events::AssetEvent;
use medialib_core::result::AppResult;
use medialib_entity::credit::CreditTarget;

use crate::asset::store::AssetStore;
use crate::context::RequestContext;

/// Cache of resolved credits keyed by URL. Misses are cached too.
#[derive(Debug, Clone)]
pub struct CreditCache {
    cache: Cache<String, Option<String>>,
}

impl CreditCache {
    /// Create a cache bounded by entry count and time-to-live.
    pub fn new(max_capacity: u64, ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();
        Self { cache }
    }

    async fn get(&self, url: &str) -> Option<Option<String>> {
        self.cache.get(url).await
    }

    async fn insert(&self, url: &str, credit: Option<String>) {
        self.cache.insert(url.to_string(), credit).await;
    }

    /// Drop the cached entry for `url`.
    pub async fn invalidate(&self, url: &str) {
        self.cache.invalidate(url).await;
    }
}

impl AssetStore {
    /// The credit shown wherever `url` is displayed.
    ///
    /// Resolution order: the URL-keyed lookup, then the legacy field of any
    /// asset row with that URL, then nothing.
    pub async fn effective_credit(&self, url: &str) -> AppResult<Option<String>> {
        if let Some(cached) = self.credit_cache.get(url).await {
            return Ok(cached);
        }

        let resolved = match self.credits.get(url).await? {
            Some(record) => Some(record.credit),
            None => self
                .assets
                .find_by_url(url)
                .await?
                .into_iter()
                .find_map(|asset| asset.credit.filter(|c| !c.trim().is_empty())),
        };

        debug!(url, found = resolved.is_some(), "Resolved credit");
        self.credit_cache.insert(url, resolved.clone()).await;
        Ok(resolved)
    }

    /// Set or clear the global credit for a URL or for a file's URL.
    ///
    /// Blank text clears the lookup entry. Returns the URL that was updated.
    pub async fn update_credit(
        &self,
        ctx: &RequestContext,
        target: CreditTarget,
        credit: &str,
    ) -> AppResult<String> {
        ctx.require_admin("update credits")?;

        let url = match target {
            CreditTarget::Asset(id) => {
                let asset = self.get_any(ctx, id).await?;
                if !asset.is_file() {
                    return Err(AppError::not_found(format!("File {id} not found")));
                }
                asset
                    .url
                    .ok_or_else(|| AppError::internal(format!("File {id} has no URL")))?
            }
            CreditTarget::Url(url) => {
                let url = url.trim().to_string();
                if url.is_empty() {
                    return Err(AppError::validation("Credit URL cannot be empty"));
                }
                url
            }
        };

        let credit = credit.trim();
        if credit.is_empty() {
            self.credits.delete(&url).await?;
            info!(url = %url, "Credit cleared");
        } else {
            self.credits.upsert(&url, credit).await?;
            info!(url = %url, "Credit updated");
        }
        self.credit_cache.invalidate(&url).await;

        self.publish(ctx, AssetEvent::CreditUpdated { url: url.clone() });
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::testing::{admin, store, upload};
    use medialib_core::ErrorKind;
    use medialib_entity::asset::ParentRef;

    #[tokio::test]
    async fn test_global_credit_beats_legacy() {
        let (store, _) = store();
        let ctx = admin();
        let file = store
            .upload_file(
                &ctx,
                bytes::Bytes::from_static(b"img"),
                ParentRef::Root,
                "a.jpg",
                None,
                Some("Legacy"),
            )
            .await
            .unwrap();
        let url = file.url.clone().unwrap();
        assert_eq!(store.effective_credit(&url).await.unwrap().as_deref(), Some("Legacy"));

        store
            .update_credit(&ctx, CreditTarget::Asset(file.id), "Bảo tàng Lịch sử")
            .await
            .unwrap();
        assert_eq!(
            store.effective_credit(&url).await.unwrap().as_deref(),
            Some("Bảo tàng Lịch sử")
        );
    }

    #[tokio::test]
    async fn test_blank_credit_falls_back_to_legacy_row() {
        let (store, _) = store();
        let ctx = admin();
        let file = store
            .upload_file(
                &ctx,
                bytes::Bytes::from_static(b"img"),
                ParentRef::Root,
                "a.jpg",
                None,
                Some("Legacy"),
            )
            .await
            .unwrap();
        let url = file.url.clone().unwrap();

        store.update_credit(&ctx, CreditTarget::Url(url.clone()), "Museum").await.unwrap();
        assert_eq!(store.effective_credit(&url).await.unwrap().as_deref(), Some("Museum"));

        store.update_credit(&ctx, CreditTarget::Url(url.clone()), "  ").await.unwrap();
        assert!(store.credits.get(&url).await.unwrap().is_none());
        assert_eq!(store.effective_credit(&url).await.unwrap().as_deref(), Some("Legacy"));
    }

    #[tokio::test]
    async fn test_blank_credit_without_legacy_is_none() {
        let (store, _) = store();
        let ctx = admin();
        let file = upload(&store, ParentRef::Root, "a.jpg").await;
        let url = file.url.clone().unwrap();

        store.update_credit(&ctx, CreditTarget::Url(url.clone()), "Museum").await.unwrap();
        store.update_credit(&ctx, CreditTarget::Url(url.clone()), "  ").await.unwrap();
        assert_eq!(store.effective_credit(&url).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_credit_on_folder_is_not_found() {
        let (store, _) = store();
        let ctx = admin();
        let folder = store.create_folder(&ctx, "F", ParentRef::Root).await.unwrap();
        let err = store
            .update_credit(&ctx, CreditTarget::Asset(folder.id), "x")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));

        let err = store
            .update_credit(&ctx, CreditTarget::Url(" ".into()), "x")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}
