//! Log showcase site.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace context ─▶ request span ─▶ timeout
//!                                                                     │
//!                                                                     ▼
//!                                                            ┌─────────────────┐
//!                                                            │ home controller │──▶ AppLogger
//!                                                            └────────┬────────┘   (tracing)
//!                                                                     │
//!     Client Response                                                 ▼
//!     ◀────────────────────────────────────────────────────────── views (HTML)
//! ```

use std::path::PathBuf;

use clap::Parser;

use log_showcase::config::{
    load_config, render_config, validation::validate_config, ConfigError, SiteConfig,
};
use log_showcase::lifecycle::{startup, Shutdown};
use log_showcase::observability::init_logging;

#[derive(Parser)]
#[command(name = "log-showcase", version)]
#[command(about = "Demo site that exercises error, info and warning logging", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> log_showcase::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    if cli.print_config {
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?cli.config,
        "log-showcase starting"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    startup::run(config, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
