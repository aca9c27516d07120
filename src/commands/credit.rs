//! Credit management CLI commands.

use clap::{Args, Subcommand};

use medialib_core::error::AppError;
use medialib_entity::credit::CreditTarget;
use medialib_service::RequestContext;

use crate::bootstrap::App;
use crate::output::{self, OutputFormat};

/// Arguments for credit commands
#[derive(Debug, Args)]
pub struct CreditArgs {
    /// Credit subcommand
    #[command(subcommand)]
    pub command: CreditCommand,
}

/// Credit subcommands
#[derive(Debug, Subcommand)]
pub enum CreditCommand {
    /// Set the credit for a file ID or blob URL (empty text clears it)
    Set {
        /// File ID or blob URL
        target: String,
        /// Attribution text
        #[arg(default_value = "")]
        credit: String,
    },
    /// Show the effective credit for a file ID or blob URL
    Get {
        /// File ID or blob URL
        target: String,
    },
}

#[derive(Debug, serde::Serialize)]
struct CreditView {
    url: String,
    credit: Option<String>,
}

/// Execute credit commands
pub async fn execute(
    args: &CreditArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = &app.store;
    match &args.command {
        CreditCommand::Set { target, credit } => {
            let url = store
                .update_credit(ctx, CreditTarget::parse(target), credit)
                .await?;
            if credit.trim().is_empty() {
                output::print_success(&format!("Credit cleared for {url}"));
            } else {
                output::print_success(&format!("Credit set for {url}"));
            }
        }
        CreditCommand::Get { target } => {
            let url = match CreditTarget::parse(target) {
                CreditTarget::Url(url) => url,
                CreditTarget::Asset(id) => store
                    .get_any(ctx, id)
                    .await?
                    .url
                    .ok_or_else(|| AppError::validation(format!("Asset {id} is not a file")))?,
            };
            let credit = store.effective_credit(&url).await?;
            match format {
                OutputFormat::Table => {
                    output::print_kv("URL", &url);
                    output::print_kv("Credit", credit.as_deref().unwrap_or("(none)"));
                }
                OutputFormat::Json => output::print_item(&CreditView { url, credit }, format),
            }
        }
    }
    Ok(())
}
