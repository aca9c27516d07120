//! Folder management CLI commands.

use clap::{Args, Subcommand};

use medialib_core::error::AppError;
use medialib_service::RequestContext;

use super::{parse_asset_id, parse_parent};
use crate::bootstrap::App;
use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List the active contents of a folder
    List {
        /// Folder ID or `root`
        #[arg(default_value = "root")]
        parent: String,
    },
    /// Create a new folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long, default_value = "root")]
        parent: String,
    },
    /// Rename a folder or file
    Rename {
        /// Asset ID
        id: String,
        /// New name
        name: String,
    },
    /// Move a folder or file
    Move {
        /// Asset ID
        id: String,
        /// New parent folder ID or `root`
        parent: String,
    },
    /// Resolve a slash-separated path, creating missing folders
    Resolve {
        /// Path such as `materials/2024`
        path: String,
    },
    /// Show the folder tree
    Tree {
        /// Folder ID or `root`
        #[arg(default_value = "root")]
        parent: String,
    },
    /// Show the ancestor chain of a folder
    Breadcrumbs {
        /// Folder ID
        id: String,
    },
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = &app.store;
    match &args.command {
        FolderCommand::List { parent } => {
            let assets = store.list(ctx, parse_parent(parent)?).await?;
            output::print_assets(&assets, format);
        }
        FolderCommand::Create { name, parent } => {
            let folder = store.create_folder(ctx, name, parse_parent(parent)?).await?;
            output::print_success(&format!("Folder '{}' created", folder.name));
            output::print_kv("ID", &folder.id.to_string());
            output::print_kv("Parent", &folder.parent().to_string());
        }
        FolderCommand::Rename { id, name } => {
            let asset = store.rename(ctx, parse_asset_id(id)?, name).await?;
            output::print_success(&format!("Renamed to '{}'", asset.name));
        }
        FolderCommand::Move { id, parent } => {
            let asset = store
                .move_asset(ctx, parse_asset_id(id)?, parse_parent(parent)?)
                .await?;
            output::print_success(&format!("Moved '{}' to {}", asset.name, asset.parent()));
        }
        FolderCommand::Resolve { path } => {
            let folder = store.resolve_folder_by_path(ctx, path).await?;
            output::print_kv("Path", path);
            output::print_kv("Folder", &folder.to_string());
        }
        FolderCommand::Tree { parent } => {
            let tree = store.tree(ctx, parse_parent(parent)?).await?;
            output::print_tree(&tree, format);
            if format == OutputFormat::Table {
                output::print_kv("Folders", &tree.total_folders().to_string());
                output::print_kv("Files", &tree.total_files().to_string());
            }
        }
        FolderCommand::Breadcrumbs { id } => {
            let chain = store.breadcrumbs(ctx, parse_asset_id(id)?).await?;
            match format {
                OutputFormat::Table => {
                    let names: Vec<&str> = chain.iter().map(|f| f.name.as_str()).collect();
                    println!("root / {}", names.join(" / "));
                }
                OutputFormat::Json => output::print_assets(&chain, format),
            }
        }
    }
    Ok(())
}
