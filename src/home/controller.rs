//! Home controller: the site's three actions.

use std::sync::Arc;

use thiserror::Error;

use crate::home::model::ErrorViewModel;
use crate::home::views::{View, ViewResult};
use crate::http::request::RequestContext;
use crate::http::response::ResponseCache;
use crate::observability::{metrics, AppLogger};

/// Category attached to the controller's log records.
pub const CATEGORY: &str = "log_showcase::home::HomeController";

/// Operands of the division attempted on every index visit.
/// The denominator is zero so the error-logging path always runs.
pub const NUMERATOR: i32 = 5;
pub const DENOMINATOR: i32 = 0;

pub const INDEX_OPENING_MESSAGE: &str = "Index page is opening.";
pub const INDEX_WARNING_MESSAGE: &str = "Warning Error";

/// Integer arithmetic fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("Attempted to divide by zero.")]
    DivideByZero,

    #[error("Arithmetic operation resulted in an overflow.")]
    Overflow,
}

impl ArithmeticError {
    pub fn kind(&self) -> &'static str {
        match self {
            ArithmeticError::DivideByZero => "divide_by_zero",
            ArithmeticError::Overflow => "overflow",
        }
    }
}

/// Checked integer division.
pub fn divide(numerator: i32, denominator: i32) -> Result<i32, ArithmeticError> {
    if denominator == 0 {
        return Err(ArithmeticError::DivideByZero);
    }
    numerator
        .checked_div(denominator)
        .ok_or(ArithmeticError::Overflow)
}

/// Handles the home pages. Holds no per-request state.
pub struct HomeController {
    logger: Arc<dyn AppLogger>,
}

impl HomeController {
    pub fn new(logger: Arc<dyn AppLogger>) -> Self {
        Self { logger }
    }

    /// Landing page. Logs the division fault, then an info and a warning.
    pub fn index(&self) -> ViewResult {
        if let Err(err) = divide(NUMERATOR, DENOMINATOR) {
            self.logger.log_error(&err.to_string(), &err);
            metrics::record_handled_fault(err.kind());
        }

        self.logger.log_info(INDEX_OPENING_MESSAGE);
        self.logger.log_warning(INDEX_WARNING_MESSAGE);

        ViewResult::new(View::Index)
    }

    pub fn privacy(&self) -> ViewResult {
        ViewResult::new(View::Privacy)
    }

    /// Error page. Never cached.
    pub fn error(&self, context: &RequestContext) -> ViewResult {
        ViewResult::new(View::Error(ErrorViewModel::from_context(context)))
            .with_cache(ResponseCache::disabled())
    }
}
