//! In-memory article collection.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use medialib_core::result::AppResult;
use medialib_entity::article::Article;

use crate::repositories::ArticleRepository;

/// Article slug → block sequence held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryArticleRepository {
    articles: Arc<RwLock<HashMap<String, Article>>>,
}

impl MemoryArticleRepository {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleRepository for MemoryArticleRepository {
    async fn load(&self, article_id: &str) -> AppResult<Option<Article>> {
        Ok(self.articles.read().await.get(article_id).cloned())
    }

    async fn save(&self, article: &Article) -> AppResult<Article> {
        let mut saved = article.clone();
        saved.updated_at = Some(Utc::now());
        self.articles
            .write()
            .await
            .insert(saved.id.clone(), saved.clone());
        Ok(saved)
    }
}
