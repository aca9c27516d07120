//! Article repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use medialib_core::error::{AppError, ErrorKind};
use medialib_core::result::AppResult;
use medialib_entity::article::{Article, ContentBlock};

use crate::repositories::ArticleRepository;

/// Repository for article block sequences stored as JSONB.
#[derive(Debug, Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    /// Create a new article repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ArticleRow {
    id: String,
    blocks: Json<Vec<ContentBlock>>,
    updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: row.id,
            blocks: row.blocks.0,
            updated_at: Some(row.updated_at),
        }
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    async fn load(&self, article_id: &str) -> AppResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>("SELECT * FROM articles WHERE id = $1")
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load article", e))?;
        Ok(row.map(Article::from))
    }

    async fn save(&self, article: &Article) -> AppResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"INSERT INTO articles (id, blocks, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO UPDATE SET blocks = EXCLUDED.blocks, updated_at = NOW()
            RETURNING *"#,
        )
        .bind(&article.id)
        .bind(Json(&article.blocks))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save article", e))?;
        Ok(row.into())
    }
}
