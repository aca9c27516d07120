//! In-memory editing state for one article.

use medialib_core::error::AppError;
use medialib_core::result::AppResult;
use medialib_core::types::BlockId;
use medialib_entity::article::{Article, BlockBody, ContentBlock};

/// An article being edited. Changes stay local until saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    article: Article,
    dirty: bool,
}

impl ArticleDraft {
    /// Start editing `article`.
    pub fn new(article: Article) -> Self {
        Self {
            article,
            dirty: false,
        }
    }

    /// Article slug.
    pub fn id(&self) -> &str {
        &self.article.id
    }

    /// Blocks in display order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.article.blocks
    }

    /// The article as currently edited.
    pub fn article(&self) -> &Article {
        &self.article
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_saved(&mut self, saved: Article) {
        self.article = saved;
        self.dirty = false;
    }

    fn position(&self, id: BlockId) -> AppResult<usize> {
        self.article
            .blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(format!("Block {id} not found")))
    }

    /// Add a block at the end and return its id.
    pub fn append(&mut self, body: BlockBody) -> BlockId {
        let block = ContentBlock::new(body);
        let id = block.id;
        self.article.blocks.push(block);
        self.dirty = true;
        id
    }

    /// Replace the payload of a block, keeping its id and position.
    pub fn update(&mut self, id: BlockId, body: BlockBody) -> AppResult<()> {
        let index = self.position(id)?;
        self.article.blocks[index].body = body;
        self.dirty = true;
        Ok(())
    }

    /// Swap a block with its predecessor. Returns `false` at the top edge.
    pub fn move_up(&mut self, id: BlockId) -> AppResult<bool> {
        let index = self.position(id)?;
        if index == 0 {
            return Ok(false);
        }
        self.article.blocks.swap(index - 1, index);
        self.dirty = true;
        Ok(true)
    }

    /// Swap a block with its successor. Returns `false` at the bottom edge.
    pub fn move_down(&mut self, id: BlockId) -> AppResult<bool> {
        let index = self.position(id)?;
        if index + 1 >= self.article.blocks.len() {
            return Ok(false);
        }
        self.article.blocks.swap(index, index + 1);
        self.dirty = true;
        Ok(true)
    }

    /// Remove a block. Refused unless `confirmed` is set.
    pub fn delete(&mut self, id: BlockId, confirmed: bool) -> AppResult<ContentBlock> {
        if !confirmed {
            return Err(AppError::validation(format!(
                "Deleting block {id} requires confirmation"
            )));
        }
        let index = self.position(id)?;
        self.dirty = true;
        Ok(self.article.blocks.remove(index))
    }

    /// Check every block, naming the first invalid one.
    pub fn validate(&self) -> AppResult<()> {
        for (index, block) in self.article.blocks.iter().enumerate() {
            block.body.validate().map_err(|e| {
                AppError::validation(format!("Block {} ({}): {}", index + 1, block.id, e.message))
            })?;
        }
        Ok(())
    }
}
