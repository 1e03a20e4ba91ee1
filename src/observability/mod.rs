//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events, AppLogger capability)
//!     → metrics.rs (counters, histograms)
//!     → trace_context.rs (per-request activity from W3C traceparent)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metrics are cheap (no-ops without a recorder)

pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use logging::{init_logging, AppLogger, LoggingError, TracingLogger};
pub use trace_context::{ParentContext, TraceContext, TRACEPARENT};
