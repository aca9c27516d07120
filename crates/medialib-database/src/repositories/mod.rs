//! Repository contracts for the media library and their implementations.
//!
//! The traits mirror the document-collection contracts the asset store
//! relies on: an asset collection keyed by id with parent-pointer
//! hierarchy, a credit collection keyed by URL, and an article collection
//! keyed by slug.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use medialib_core::result::AppResult;
use medialib_core::types::AssetId;
use medialib_entity::article::Article;
use medialib_entity::asset::{AssetPatch, CreateAsset, ParentRef, VirtualAsset};
use medialib_entity::credit::CreditRecord;

pub use memory::{MemoryArticleRepository, MemoryAssetRepository, MemoryCreditRepository};
pub use postgres::{PgArticleRepository, PgAssetRepository, PgCreditRepository};

/// Asset metadata collection.
///
/// Listings that return several assets use folders-first, newest-first order.
#[async_trait]
pub trait AssetRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find an asset by id, trashed or not.
    async fn find_by_id(&self, id: AssetId) -> AppResult<Option<VirtualAsset>>;

    /// Active direct children of a folder.
    async fn find_children(&self, parent: ParentRef) -> AppResult<Vec<VirtualAsset>>;

    /// Direct children of a folder regardless of trashed state.
    async fn find_all_children(&self, parent: ParentRef) -> AppResult<Vec<VirtualAsset>>;

    /// Every active asset.
    async fn find_active(&self) -> AppResult<Vec<VirtualAsset>>;

    /// Every trashed asset, most recently trashed first.
    async fn find_trashed(&self) -> AppResult<Vec<VirtualAsset>>;

    /// Active assets whose name contains `term`, case-insensitively.
    async fn search_active_by_name(&self, term: &str) -> AppResult<Vec<VirtualAsset>>;

    /// Assets (any state) referencing a blob URL.
    async fn find_by_url(&self, url: &str) -> AppResult<Vec<VirtualAsset>>;

    /// Create a new asset and return it.
    async fn create(&self, data: &CreateAsset) -> AppResult<VirtualAsset>;

    /// Merge `patch` into the asset and return the result.
    ///
    /// Fails with `NotFound` if the id does not exist.
    async fn update(&self, id: AssetId, patch: &AssetPatch) -> AppResult<VirtualAsset>;

    /// Delete the asset row. Returns `true` if a row was removed.
    async fn delete(&self, id: AssetId) -> AppResult<bool>;
}

/// URL-keyed credit collection.
#[async_trait]
pub trait CreditRepository: Send + Sync + std::fmt::Debug + 'static {
    /// The credit stored for `url`, if any.
    async fn get(&self, url: &str) -> AppResult<Option<CreditRecord>>;

    /// Insert or replace the credit for `url`.
    async fn upsert(&self, url: &str, credit: &str) -> AppResult<CreditRecord>;

    /// Remove the credit for `url`. Returns `true` if one existed.
    async fn delete(&self, url: &str) -> AppResult<bool>;
}

/// Article block-sequence collection.
#[async_trait]
pub trait ArticleRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Load an article, or `None` if it was never saved.
    async fn load(&self, article_id: &str) -> AppResult<Option<Article>>;

    /// Replace the whole block sequence in a single write.
    async fn save(&self, article: &Article) -> AppResult<Article>;
}
