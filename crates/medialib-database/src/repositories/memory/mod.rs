//! In-memory repository implementations.
//!
//! Backed by `tokio::sync::RwLock` maps. Used for tests, demos, and
//! single-process deployments without a database.

pub mod article;
pub mod asset;
pub mod credit;

pub use article::MemoryArticleRepository;
pub use asset::MemoryAssetRepository;
pub use credit::MemoryCreditRepository;
