//! Database migration command.

use medialib_core::config::AppConfig;
use medialib_core::config::database::DatabaseBackend;
use medialib_core::error::AppError;
use medialib_database::DatabasePool;
use medialib_database::migration::run_migrations;

use crate::output;

/// Run all pending migrations against the configured database
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        output::print_warning("database.backend is `memory`; nothing to migrate.");
        return Ok(());
    }
    let pool = DatabasePool::connect(&config.database).await?;
    pool.ping().await?;
    println!("Running database migrations...");
    let count = run_migrations(pool.pool()).await?;
    output::print_success(&format!("Schema is at migration {count}."));
    Ok(())
}
