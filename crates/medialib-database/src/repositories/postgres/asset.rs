//! Asset repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use medialib_core::error::{AppError, ErrorKind};
use medialib_core::result::AppResult;
use medialib_core::types::AssetId;
use medialib_entity::asset::{AssetPatch, CreateAsset, ParentRef, VirtualAsset};

use crate::repositories::AssetRepository;

const LISTING_ORDER: &str = "ORDER BY (kind = 'file') ASC, created_at DESC, id DESC";

/// Repository for virtual asset rows.
#[derive(Debug, Clone)]
pub struct PgAssetRepository {
    pool: PgPool,
}

impl PgAssetRepository {
    /// Create a new asset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl AssetRepository for PgAssetRepository {
    async fn find_by_id(&self, id: AssetId) -> AppResult<Option<VirtualAsset>> {
        sqlx::query_as::<_, VirtualAsset>("SELECT * FROM virtual_assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find asset", e))
    }

    async fn find_children(&self, parent: ParentRef) -> AppResult<Vec<VirtualAsset>> {
        let sql = format!(
            "SELECT * FROM virtual_assets \
             WHERE parent_id IS NOT DISTINCT FROM $1 AND deleted_at IS NULL {LISTING_ORDER}"
        );
        sqlx::query_as::<_, VirtualAsset>(&sql)
            .bind(parent.folder_id())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_all_children(&self, parent: ParentRef) -> AppResult<Vec<VirtualAsset>> {
        let sql = format!(
            "SELECT * FROM virtual_assets WHERE parent_id IS NOT DISTINCT FROM $1 {LISTING_ORDER}"
        );
        sqlx::query_as::<_, VirtualAsset>(&sql)
            .bind(parent.folder_id())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_active(&self) -> AppResult<Vec<VirtualAsset>> {
        let sql = format!("SELECT * FROM virtual_assets WHERE deleted_at IS NULL {LISTING_ORDER}");
        sqlx::query_as::<_, VirtualAsset>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list active assets", e)
            })
    }

    async fn find_trashed(&self) -> AppResult<Vec<VirtualAsset>> {
        sqlx::query_as::<_, VirtualAsset>(
            "SELECT * FROM virtual_assets WHERE deleted_at IS NOT NULL \
             ORDER BY deleted_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list trash", e))
    }

    async fn search_active_by_name(&self, term: &str) -> AppResult<Vec<VirtualAsset>> {
        let sql = format!(
            "SELECT * FROM virtual_assets \
             WHERE deleted_at IS NULL AND name ILIKE $1 ESCAPE '\\' {LISTING_ORDER}"
        );
        sqlx::query_as::<_, VirtualAsset>(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search assets", e))
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Vec<VirtualAsset>> {
        let sql = format!("SELECT * FROM virtual_assets WHERE url = $1 {LISTING_ORDER}");
        sqlx::query_as::<_, VirtualAsset>(&sql)
            .bind(url)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find assets by URL", e)
            })
    }

    async fn create(&self, data: &CreateAsset) -> AppResult<VirtualAsset> {
        sqlx::query_as::<_, VirtualAsset>(
            r#"INSERT INTO virtual_assets (id, name, kind, parent_id, url, credit)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *"#,
        )
        .bind(AssetId::new())
        .bind(&data.name)
        .bind(data.kind)
        .bind(data.parent_id)
        .bind(&data.url)
        .bind(&data.credit)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create asset", e))
    }

    async fn update(&self, id: AssetId, patch: &AssetPatch) -> AppResult<VirtualAsset> {
        sqlx::query_as::<_, VirtualAsset>(
            r#"UPDATE virtual_assets SET
                name = COALESCE($2, name),
                parent_id = CASE WHEN $3 THEN $4 ELSE parent_id END,
                credit = CASE WHEN $5 THEN $6 ELSE credit END,
                deleted_at = CASE WHEN $7 THEN $8 ELSE deleted_at END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *"#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.parent_id.is_some())
        .bind(patch.parent_id.flatten())
        .bind(patch.credit.is_some())
        .bind(patch.credit.clone().flatten())
        .bind(patch.deleted_at.is_some())
        .bind(patch.deleted_at.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update asset", e))?
        .ok_or_else(|| AppError::not_found(format!("Asset {id} not found")))
    }

    async fn delete(&self, id: AssetId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM virtual_assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete asset", e))?;
        Ok(result.rows_affected() > 0)
    }
}
