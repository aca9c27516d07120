//! medialib: admin CLI for the media library.
//!
//! Loads configuration, initializes logging, wires the asset store and
//! article editor, and dispatches the requested command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use medialib_core::config::AppConfig;
use medialib_core::error::AppError;

mod bootstrap;
mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(config).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay, and variables.
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("MEDIALIB_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());
    let env = cli
        .env
        .clone()
        .or_else(|| std::env::var("MEDIALIB_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
