//! PostgreSQL pool for the metadata collections.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use medialib_core::config::database::DatabaseConfig;
use medialib_core::error::{AppError, ErrorKind};
use medialib_core::result::AppResult;

/// The pool shared by the asset, credit and article repositories.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool sized by `config`.
    ///
    /// Only `postgres://` and `postgresql://` URLs are accepted.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let masked = mask_password(&config.url);
        if !(config.url.starts_with("postgres://") || config.url.starts_with("postgresql://")) {
            return Err(AppError::configuration(format!(
                "database.url must be a PostgreSQL URL, got {masked}"
            )));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Cannot reach {masked}"), e)
            })?;

        info!(url = %masked, max_connections = config.max_connections, "Metadata database connected");
        Ok(Self { pool })
    }

    /// Borrow the sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Hand the sqlx pool to the repositories.
    pub fn into_pool(self) -> PgPool {
        self.pool
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
    }
}

/// Replace the password in a connection URL with `****`.
///
/// URLs without credentials, or with a user but no password, come back unchanged.
pub fn mask_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}
