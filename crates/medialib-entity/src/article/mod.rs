//! Article content entities for the block editor.

pub mod block;
pub mod model;

pub use block::{BlockBody, Card, ContentBlock};
pub use model::Article;
