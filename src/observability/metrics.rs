//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): requests by action, status
//! - `site_request_duration_seconds` (histogram): handler latency by action
//! - `site_handled_faults_total` (counter): faults caught and logged by handlers
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(action: &'static str, status: u16, start: Instant) {
    counter!("site_requests_total", "action" => action, "status" => status.to_string())
        .increment(1);
    histogram!("site_request_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}

/// Record a fault that a handler caught instead of propagating.
pub fn record_handled_fault(kind: &'static str) {
    counter!("site_handled_faults_total", "kind" => kind).increment(1);
}
