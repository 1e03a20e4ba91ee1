//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Define the logging capability handed to controllers
//! - Configure log level at runtime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - Log level configurable via config and environment

use std::error::Error as StdError;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Logging capability consumed by request handlers.
///
/// Implementations record or forward each message. Nothing else
/// (filtering, formatting, destination) is part of the contract.
pub trait AppLogger: Send + Sync {
    /// Record a failure together with the fault that caused it.
    fn log_error(&self, message: &str, cause: &(dyn StdError + 'static));

    /// Record an informational message.
    fn log_info(&self, message: &str);

    /// Record a warning.
    fn log_warning(&self, message: &str);
}

/// [`AppLogger`] that forwards to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    category: &'static str,
}

impl TracingLogger {
    /// Create a logger whose records carry `category` as a field.
    pub fn new(category: &'static str) -> Self {
        Self { category }
    }
}

impl AppLogger for TracingLogger {
    fn log_error(&self, message: &str, cause: &(dyn StdError + 'static)) {
        tracing::error!(category = self.category, error = cause, "{message}");
    }

    fn log_info(&self, message: &str) {
        tracing::info!(category = self.category, "{message}");
    }

    fn log_warning(&self, message: &str) {
        tracing::warn!(category = self.category, "{message}");
    }
}

/// Error raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("subscriber already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Build the filter: `RUST_LOG` wins over the configured directive.
fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_filter))
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(build_filter(config)?);

    match config.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init()?,
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
    }

    Ok(())
}
