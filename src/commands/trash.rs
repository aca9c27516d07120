//! Trash management CLI commands.

use clap::{Args, Subcommand};
use dialoguer::Confirm;
use tokio_util::sync::CancellationToken;

use medialib_core::error::AppError;
use medialib_service::RequestContext;

use super::parse_asset_id;
use crate::bootstrap::App;
use crate::output::{self, OutputFormat};

/// Arguments for trash commands
#[derive(Debug, Args)]
pub struct TrashArgs {
    /// Trash subcommand
    #[command(subcommand)]
    pub command: TrashCommand,
}

/// Trash subcommands
#[derive(Debug, Subcommand)]
pub enum TrashCommand {
    /// List trashed assets, most recent first
    List,
    /// Move an asset to the trash
    Delete {
        /// Asset ID
        id: String,
    },
    /// Take an asset out of the trash
    Restore {
        /// Asset ID
        id: String,
    },
    /// Permanently delete an asset and, for folders, everything inside
    Purge {
        /// Asset ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Permanently delete everything in the trash
    Empty {
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Execute trash commands
pub async fn execute(
    args: &TrashArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = &app.store;
    match &args.command {
        TrashCommand::List => {
            let trashed = store.list_trash(ctx).await?;
            output::print_assets(&trashed, format);
        }
        TrashCommand::Delete { id } => {
            let asset = store.soft_delete(ctx, parse_asset_id(id)?).await?;
            output::print_success(&format!("'{}' moved to trash", asset.name));
        }
        TrashCommand::Restore { id } => {
            let asset = store.restore(ctx, parse_asset_id(id)?).await?;
            output::print_success(&format!("'{}' restored to {}", asset.name, asset.parent()));
        }
        TrashCommand::Purge { id, yes } => {
            let id = parse_asset_id(id)?;
            let asset = store.get_any(ctx, id).await?;
            if !confirm(*yes, &format!("Permanently delete '{}'?", asset.name))? {
                output::print_warning("Aborted.");
                return Ok(());
            }

            // Ctrl-C stops the cascade between nodes.
            let cancel = CancellationToken::new();
            let on_signal = cancel.clone();
            let watcher = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_signal.cancel();
                }
            });
            let result = store.hard_delete_with_cancel(ctx, id, &cancel).await;
            watcher.abort();

            let removed = result?;
            output::print_success(&format!(
                "'{}' permanently deleted ({} rows)",
                asset.name,
                removed.len()
            ));
        }
        TrashCommand::Empty { yes } => {
            if !confirm(*yes, "Permanently delete everything in the trash?")? {
                output::print_warning("Aborted.");
                return Ok(());
            }
            let report = store.empty_trash(ctx).await?;
            match format {
                OutputFormat::Table => {
                    output::print_success(&format!("{} rows purged", report.purged.len()));
                    for (id, reason) in &report.failed {
                        output::print_warning(&format!("{id}: {reason}"));
                    }
                }
                OutputFormat::Json => output::print_item(&report, format),
            }
            if !report.failed.is_empty() {
                return Err(AppError::deletion(format!(
                    "{} trashed items could not be deleted",
                    report.failed.len()
                )));
            }
        }
    }
    Ok(())
}

fn confirm(skip: bool, prompt: &str) -> Result<bool, AppError> {
    if skip {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))
}
