//! Display variant CLI command.

use clap::Args;

use medialib_core::error::AppError;
use medialib_core::traits::storage::Dimensions;
use medialib_entity::credit::CreditTarget;
use medialib_service::RequestContext;

use crate::bootstrap::App;

/// Arguments for the display command
#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// File ID or blob URL
    pub target: String,

    /// Maximum width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Maximum height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,
}

/// Execute the display command
pub async fn execute(args: &DisplayArgs, app: &App, ctx: &RequestContext) -> Result<(), AppError> {
    let url = app
        .store
        .display_url(
            ctx,
            CreditTarget::parse(&args.target),
            Dimensions::new(args.width, args.height),
        )
        .await?;
    println!("{url}");
    Ok(())
}
