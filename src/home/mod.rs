//! Home pages.
//!
//! # Data Flow
//! ```text
//! handler (http/server.rs)
//!     → controller.rs (action logic, logging through AppLogger)
//!     → ViewResult (view + model + cache policy)
//!     → views.rs (HTML layout) → response
//! ```

pub mod controller;
pub mod model;
pub mod views;

pub use controller::{divide, ArithmeticError, HomeController};
pub use model::ErrorViewModel;
pub use views::{SiteView, View, ViewResult};
