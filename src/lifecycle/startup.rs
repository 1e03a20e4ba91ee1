//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order (metrics, listener, server)
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::SiteConfig;
use crate::error::Result;
use crate::http::HttpServer;
use crate::observability::metrics;

/// Start every subsystem and serve until `shutdown` fires.
///
/// `config` must already be validated. Subscribe `shutdown` before any
/// signal can be delivered so a trigger during startup is not lost.
pub async fn run(config: SiteConfig, shutdown: broadcast::Receiver<()>) -> Result<()> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse().map_err(|_| {
            crate::error::Error::Startup(format!(
                "metrics address `{}` is not a socket address",
                config.observability.metrics_address
            ))
        })?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        request_timeout_secs = config.timeouts.request_secs,
        tracing_enabled = config.observability.tracing_enabled,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener, shutdown).await?;
    Ok(())
}
