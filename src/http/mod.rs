//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routes)
//!     → request.rs (request ID, request span, RequestContext)
//!     → home controller action
//!     → response.rs (HTML body, cache headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestContext, X_REQUEST_ID};
pub use response::{CacheLocation, ResponseCache};
pub use server::HttpServer;
