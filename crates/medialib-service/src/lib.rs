//! # medialib-service
//!
//! The virtual asset store and the content block editor. Services receive
//! their repositories, object storage, and change feed through constructor
//! injection and take a [`RequestContext`] on every call.

pub mod article;
pub mod asset;
pub mod context;
pub mod guard;

pub use article::{ArticleDraft, ArticleEditor};
pub use asset::{AssetStore, PurgeReport};
pub use context::{RequestContext, Role};
pub use guard::InFlightGuard;
