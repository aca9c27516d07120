//! PostgreSQL repository implementations.

pub mod article;
pub mod asset;
pub mod credit;

pub use article::PgArticleRepository;
pub use asset::PgAssetRepository;
pub use credit::PgCreditRepository;
