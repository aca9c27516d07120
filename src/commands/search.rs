//! Name search CLI command.

use clap::Args;

use medialib_core::error::AppError;
use medialib_service::RequestContext;

use crate::bootstrap::App;
use crate::output::{self, OutputFormat};

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive substring of the name
    pub term: String,
}

/// Execute the search command
pub async fn execute(
    args: &SearchArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let hits = app.store.search_all(ctx, &args.term).await?;
    output::print_assets(&hits, format);
    Ok(())
}
