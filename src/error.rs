//! Top-level error type for starting and running the site.

use thiserror::Error;

use crate::config::ConfigError;
use crate::observability::LoggingError;

/// Result type alias for startup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop the process.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Startup error: {0}")]
    Startup(String),
}
