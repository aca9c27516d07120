//! Typed content blocks.

use serde::{Deserialize, Serialize};

use medialib_core::AppError;
use medialib_core::result::AppResult;
use medialib_core::types::BlockId;

/// A block in an article, with a stable identity for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block identifier.
    pub id: BlockId,
    /// Typed payload.
    #[serde(flatten)]
    pub body: BlockBody,
}

impl ContentBlock {
    /// Wrap a payload with a fresh id.
    pub fn new(body: BlockBody) -> Self {
        Self {
            id: BlockId::new(),
            body,
        }
    }
}

/// A card inside a card grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card title.
    pub title: String,
    /// Card text.
    #[serde(default)]
    pub body: String,
    /// Optional image URL from the asset store.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Block payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockBody {
    /// Body text.
    Paragraph {
        /// Paragraph text.
        text: String,
    },
    /// Section heading.
    Heading {
        /// Heading text.
        text: String,
        /// Heading level, 1 to 4.
        level: u8,
    },
    /// A single image.
    Image {
        /// Image URL from the asset store.
        url: String,
        /// Optional caption.
        #[serde(default)]
        caption: Option<String>,
    },
    /// Pull quote.
    Quote {
        /// Quoted text.
        text: String,
        /// Optional attribution line.
        #[serde(default)]
        author: Option<String>,
    },
    /// Two text columns, optionally with an image.
    TwoColumn {
        /// Left column text.
        left: String,
        /// Right column text.
        right: String,
        /// Optional image URL.
        #[serde(default)]
        image_url: Option<String>,
    },
    /// Grid of cards.
    CardGrid {
        /// Cards in display order.
        cards: Vec<Card>,
    },
}

impl BlockBody {
    /// The block type name as stored.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::Image { .. } => "image",
            Self::Quote { .. } => "quote",
            Self::TwoColumn { .. } => "two_column",
            Self::CardGrid { .. } => "card_grid",
        }
    }

    /// Check that the block has the required fields for its type.
    pub fn validate(&self) -> AppResult<()> {
        let require = |value: &str, field: &str| {
            if value.trim().is_empty() {
                Err(AppError::validation(format!(
                    "{} block requires a non-empty {field}",
                    self.type_name()
                )))
            } else {
                Ok(())
            }
        };

        match self {
            Self::Paragraph { text } => require(text, "text"),
            Self::Heading { text, level } => {
                require(text, "text")?;
                if !(1..=4).contains(level) {
                    return Err(AppError::validation(format!(
                        "heading level must be between 1 and 4, got {level}"
                    )));
                }
                Ok(())
            }
            Self::Image { url, .. } => require(url, "url"),
            Self::Quote { text, .. } => require(text, "text"),
            Self::TwoColumn { left, right, .. } => {
                if left.trim().is_empty() && right.trim().is_empty() {
                    return Err(AppError::validation(
                        "two_column block requires text in at least one column",
                    ));
                }
                Ok(())
            }
            Self::CardGrid { cards } => {
                if cards.is_empty() {
                    return Err(AppError::validation("card_grid block requires at least one card"));
                }
                cards.iter().try_for_each(|card| require(&card.title, "card title"))
            }
        }
    }

    /// Image URLs this block references.
    pub fn image_urls(&self) -> Vec<&str> {
        match self {
            Self::Image { url, .. } => vec![url.as_str()],
            Self::TwoColumn { image_url, .. } => image_url.as_deref().into_iter().collect(),
            Self::CardGrid { cards } => cards
                .iter()
                .filter_map(|card| card.image_url.as_deref())
                .collect(),
            Self::Paragraph { .. } | Self::Heading { .. } | Self::Quote { .. } => Vec::new(),
        }
    }
}
