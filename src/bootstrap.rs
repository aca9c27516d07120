//! Wires repositories, object storage, and services from configuration.

use tracing::info;

use medialib_core::config::AppConfig;
use medialib_core::result::AppResult;
use medialib_database::{ChangeFeed, Repositories};
use medialib_service::{ArticleEditor, AssetStore};
use medialib_storage::build_storage;

/// Everything a command needs.
pub struct App {
    /// Loaded configuration.
    pub config: AppConfig,
    /// The virtual asset store.
    pub store: AssetStore,
    /// The content block editor.
    pub editor: ArticleEditor,
}

impl App {
    /// Build the services described by `config`.
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        info!(
            backend = ?config.database.backend,
            storage = ?config.storage.provider,
            "Starting medialib v{}",
            env!("CARGO_PKG_VERSION")
        );

        // ── Step 1: Metadata repositories ────────────────────────────
        let repos = Repositories::connect(&config.database).await?;

        // ── Step 2: Object storage ───────────────────────────────────
        let storage = build_storage(&config.storage).await?;

        // ── Step 3: Services ─────────────────────────────────────────
        let feed = ChangeFeed::new(config.library.change_feed_capacity);
        let store = AssetStore::new(&repos, storage, feed, &config.library);
        let editor = ArticleEditor::new(repos.articles.clone(), store.clone());

        Ok(Self {
            config,
            store,
            editor,
        })
    }
}
