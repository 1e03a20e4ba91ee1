//! View models.

use crate::http::request::RequestContext;

/// Model of the error page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorViewModel {
    /// Activity id of the current trace, or the request's correlation id.
    pub request_id: Option<String>,
}

impl ErrorViewModel {
    pub fn from_context(context: &RequestContext) -> Self {
        Self {
            request_id: context.trace_identifier(),
        }
    }

    pub fn show_request_id(&self) -> bool {
        self.request_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}
