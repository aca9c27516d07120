//! Article entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block::ContentBlock;

/// An article composed as an ordered list of typed blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article slug.
    pub id: String,
    /// Blocks in display order.
    pub blocks: Vec<ContentBlock>,
    /// When the sequence was last saved (`None` if never saved).
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// An unsaved article with no blocks.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            blocks: Vec::new(),
            updated_at: None,
        }
    }

    /// Every image URL referenced by the article, in block order, deduplicated.
    pub fn image_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        for url in self.blocks.iter().flat_map(|b| b.body.image_urls()) {
            if !urls.iter().any(|u| u == url) {
                urls.push(url.to_string());
            }
        }
        urls
    }
}
