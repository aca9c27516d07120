//! Loading and saving articles.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use medialib_core::error::AppError;
use medialib_core::events::{ArticleEvent, DomainEvent};
use medialib_core::result::AppResult;
use medialib_database::ChangeFeed;
use medialib_database::repositories::ArticleRepository;
use medialib_entity::article::Article;

use crate::article::draft::ArticleDraft;
use crate::asset::AssetStore;
use crate::context::RequestContext;

/// Credit resolved for one image referenced by an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageCredit {
    /// Image URL.
    pub url: String,
    /// Effective credit, if any.
    pub credit: Option<String>,
}

/// Loads articles into drafts and writes them back in one operation.
#[derive(Debug, Clone)]
pub struct ArticleEditor {
    articles: Arc<dyn ArticleRepository>,
    store: AssetStore,
    feed: ChangeFeed,
}

impl ArticleEditor {
    /// Creates a new editor. Credits are resolved through `store`.
    pub fn new(articles: Arc<dyn ArticleRepository>, store: AssetStore) -> Self {
        let feed = store.feed().clone();
        Self {
            articles,
            store,
            feed,
        }
    }

    /// Open an article for editing. An unknown slug starts empty.
    pub async fn load(&self, _ctx: &RequestContext, article_id: &str) -> AppResult<ArticleDraft> {
        let article_id = validate_slug(article_id)?;
        let article = self
            .articles
            .load(article_id)
            .await?
            .unwrap_or_else(|| Article::empty(article_id));
        Ok(ArticleDraft::new(article))
    }

    /// Validate every block and store the whole sequence in one write.
    pub async fn save(&self, ctx: &RequestContext, draft: &mut ArticleDraft) -> AppResult<Article> {
        ctx.require_admin("save articles")?;
        draft.validate()?;

        let saved = self.articles.save(draft.article()).await?;
        let block_count = saved.blocks.len();
        draft.mark_saved(saved.clone());

        info!(article_id = %saved.id, block_count, "Article saved");
        self.feed.publish(DomainEvent::article(
            Some(ctx.actor.clone()),
            ArticleEvent::Saved {
                article_id: saved.id.clone(),
                block_count,
            },
        ));
        Ok(saved)
    }

    /// Effective credit of every image the article references.
    pub async fn image_blocks_credits(&self, article: &Article) -> AppResult<Vec<ImageCredit>> {
        let mut credits = Vec::new();
        for url in article.image_urls() {
            let credit = self.store.effective_credit(&url).await?;
            credits.push(ImageCredit { url, credit });
        }
        Ok(credits)
    }
}

fn validate_slug(article_id: &str) -> AppResult<&str> {
    let slug = article_id.trim();
    if slug.is_empty() {
        return Err(AppError::validation("Article id cannot be empty"));
    }
    Ok(slug)
}
