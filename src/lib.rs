//! Log showcase site library.
//!
//! A small web site whose landing page deliberately divides by zero,
//! catches the fault and logs it, to exercise the logging pipeline.

pub mod config;
pub mod error;
pub mod home;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::SiteConfig;
pub use error::{Error, Result};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
