//! Content block editor.

pub mod draft;
pub mod editor;

pub use draft::ArticleDraft;
pub use editor::{ArticleEditor, ImageCredit};
