//! Credit repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use medialib_core::error::{AppError, ErrorKind};
use medialib_core::result::AppResult;
use medialib_entity::credit::CreditRecord;

use crate::repositories::CreditRepository;

/// Repository for the URL-keyed credit table.
#[derive(Debug, Clone)]
pub struct PgCreditRepository {
    pool: PgPool,
}

impl PgCreditRepository {
    /// Create a new credit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for PgCreditRepository {
    async fn get(&self, url: &str) -> AppResult<Option<CreditRecord>> {
        sqlx::query_as::<_, CreditRecord>("SELECT * FROM asset_credits WHERE url = $1")
            .bind(url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read credit", e))
    }

    async fn upsert(&self, url: &str, credit: &str) -> AppResult<CreditRecord> {
        sqlx::query_as::<_, CreditRecord>(
            r#"INSERT INTO asset_credits (url, credit, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (url) DO UPDATE SET credit = EXCLUDED.credit, updated_at = NOW()
            RETURNING *"#,
        )
        .bind(url)
        .bind(credit)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write credit", e))
    }

    async fn delete(&self, url: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM asset_credits WHERE url = $1")
            .bind(url)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete credit", e))?;
        Ok(result.rows_affected() > 0)
    }
}
