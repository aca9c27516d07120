//! Schema migrations for `virtual_assets`, `asset_credits` and `articles`.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use medialib_core::error::{AppError, ErrorKind};
use medialib_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Versions of the migrations compiled into this build, oldest first.
pub fn known_versions() -> Vec<i64> {
    MIGRATOR.iter().map(|m| m.version).collect()
}

/// Apply pending migrations. Returns how many migrations the schema is at.
pub async fn run_migrations(pool: &PgPool) -> AppResult<usize> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Schema migration failed: {e}"), e)
    })?;

    let versions = known_versions();
    info!(count = versions.len(), latest = ?versions.last(), "Metadata schema up to date");
    Ok(versions.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_versions_are_ordered() {
        let versions = known_versions();
        assert!(!versions.is_empty());
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }
}
