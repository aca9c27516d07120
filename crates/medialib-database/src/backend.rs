//! Repository bundle selected from configuration.

use std::sync::Arc;

use tracing::info;

use medialib_core::config::database::{DatabaseBackend, DatabaseConfig};
use medialib_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{
    ArticleRepository, AssetRepository, CreditRepository, MemoryArticleRepository,
    MemoryAssetRepository, MemoryCreditRepository, PgArticleRepository, PgAssetRepository,
    PgCreditRepository,
};

/// The three collections the media library reads and writes.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Asset metadata.
    pub assets: Arc<dyn AssetRepository>,
    /// URL-keyed credits.
    pub credits: Arc<dyn CreditRepository>,
    /// Article block sequences.
    pub articles: Arc<dyn ArticleRepository>,
}

impl Repositories {
    /// Fresh, empty in-memory collections.
    pub fn memory() -> Self {
        Self {
            assets: Arc::new(MemoryAssetRepository::new()),
            credits: Arc::new(MemoryCreditRepository::new()),
            articles: Arc::new(MemoryArticleRepository::new()),
        }
    }

    /// Build the collections for the configured backend.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory metadata repositories");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                let pool = db.into_pool();
                Ok(Self {
                    assets: Arc::new(PgAssetRepository::new(pool.clone())),
                    credits: Arc::new(PgCreditRepository::new(pool.clone())),
                    articles: Arc::new(PgArticleRepository::new(pool)),
                })
            }
        }
    }
}
