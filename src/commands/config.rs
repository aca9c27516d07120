//! Configuration CLI commands.

use clap::{Args, Subcommand};

use medialib_core::config::AppConfig;
use medialib_core::error::AppError;
use medialib_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = mask_password(&shown.database.url);
            if !shown.storage.s3.secret_key.is_empty() {
                shown.storage.s3.secret_key = "****".to_string();
            }
            output::print_item(&shown, format);
        }
    }
    Ok(())
}
