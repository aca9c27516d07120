//! CLI command definitions and dispatch.

pub mod article;
pub mod config;
pub mod credit;
pub mod display;
pub mod folder;
pub mod migrate;
pub mod search;
pub mod trash;
pub mod upload;

use clap::{Parser, Subcommand};

use medialib_core::config::AppConfig;
use medialib_core::error::AppError;
use medialib_core::types::AssetId;
use medialib_entity::asset::ParentRef;
use medialib_service::RequestContext;

use crate::bootstrap::App;
use crate::output::OutputFormat;

/// medialib: folders, uploads, trash, credits, and article blocks
#[derive(Debug, Parser)]
#[command(name = "medialib", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: $MEDIALIB_CONFIG or config/default.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Configuration overlay name (default: $MEDIALIB_ENV or development)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Name recorded as the actor of changes
    #[arg(long, default_value = "cli")]
    pub actor: String,

    /// Run with the viewer role; mutations are refused
    #[arg(long)]
    pub read_only: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Folder management
    Folder(folder::FolderArgs),
    /// Upload a file
    Upload(upload::UploadArgs),
    /// Search active assets by name
    Search(search::SearchArgs),
    /// Trash management
    Trash(trash::TrashArgs),
    /// Credit management
    Credit(credit::CreditArgs),
    /// Resized display URL for a file or blob URL
    Display(display::DisplayArgs),
    /// Article block editing
    Article(article::ArticleArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Run database migrations
    Migrate,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => return config::execute(args, &config, self.format),
            Commands::Migrate => return migrate::execute(&config).await,
            _ => {}
        }

        let app = App::build(config).await?;
        let ctx = self.context();
        match &self.command {
            Commands::Folder(args) => folder::execute(args, &app, &ctx, self.format).await,
            Commands::Upload(args) => upload::execute(args, &app, &ctx, self.format).await,
            Commands::Search(args) => search::execute(args, &app, &ctx, self.format).await,
            Commands::Trash(args) => trash::execute(args, &app, &ctx, self.format).await,
            Commands::Credit(args) => credit::execute(args, &app, &ctx, self.format).await,
            Commands::Display(args) => display::execute(args, &app, &ctx).await,
            Commands::Article(args) => article::execute(args, &app, &ctx, self.format).await,
            Commands::Config(_) | Commands::Migrate => Ok(()),
        }
    }

    fn context(&self) -> RequestContext {
        if self.read_only {
            RequestContext::viewer(&self.actor)
        } else {
            RequestContext::admin(&self.actor)
        }
    }
}

/// Helper: parse an asset id argument
pub fn parse_asset_id(input: &str) -> Result<AssetId, AppError> {
    input
        .trim()
        .parse()
        .map_err(|e| AppError::validation(format!("Invalid asset id '{input}': {e}")))
}

/// Helper: parse a parent argument (`root` or a folder id)
pub fn parse_parent(input: &str) -> Result<ParentRef, AppError> {
    input.parse()
}
