//! Recursos portal: monitoring, supervision, and school-centre resources.
//!
//! Main entry point that wires the crates together and starts the shell.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use recursos_core::config::AppConfig;
use recursos_core::error::AppError;
use recursos_service::ViewController;

mod output;
mod shell;

use output::OutputFormat;
use shell::Shell;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "recursos", version, about = "Ministry resource portal shell")]
struct Args {
    /// Configuration directory (default: $RECURSOS_CONFIG_DIR or `config`)
    #[arg(long)]
    config_dir: Option<String>,
    /// Configuration environment overlay (default: $RECURSOS_ENV or `development`)
    #[arg(long)]
    env: Option<String>,
    /// Listing output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, args.format).await {
        tracing::error!(error = %e, "Portal error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration(args: &Args) -> Result<AppConfig, AppError> {
    let dir = args
        .config_dir
        .clone()
        .or_else(|| std::env::var("RECURSOS_CONFIG_DIR").ok())
        .unwrap_or_else(|| "config".to_string());
    let env = args
        .env
        .clone()
        .or_else(|| std::env::var("RECURSOS_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    AppConfig::load(&dir, &env)
}

/// Initialize tracing/logging
///
/// Logs go to stderr so they never interleave with listings on stdout.
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

/// Build the stores and controller, then hand over to the shell
async fn run(config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    tracing::info!("Starting recursos v{}", env!("CARGO_PKG_VERSION"));

    let state_store = recursos_storage::state::from_config(&config.state).await?;
    tracing::info!(store = state_store.store_type(), "State store ready");

    let gateway = recursos_storage::gateway_from_config(&config.storage)?;
    let controller = ViewController::init(&config, state_store, gateway).await?;

    Shell::new(controller, format).run().await
}
