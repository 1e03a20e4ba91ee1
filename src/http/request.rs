//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) unless the caller sent one
//! - Carry the request ID and trace context into request spans
//! - Hand both to handlers as a [`RequestContext`]
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An incoming `x-request-id` is kept so callers can correlate

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, HeaderValue, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::observability::TraceContext;

/// Correlation header set on every request and echoed on every response.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Span for one request, tagged with its correlation identifiers.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request_id_of(request.extensions().get::<RequestId>(), request.headers())
        .unwrap_or_else(|| "unknown".to_string());
    let trace_id = request
        .extensions()
        .get::<TraceContext>()
        .map(TraceContext::trace_id_hex)
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        trace_id = %trace_id
    )
}

fn request_id_of(extension: Option<&RequestId>, headers: &axum::http::HeaderMap) -> Option<String> {
    extension
        .map(RequestId::header_value)
        .or_else(|| headers.get(X_REQUEST_ID))
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Per-request identifiers available to handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id assigned by the request-id layer.
    pub request_id: Option<String>,
    /// Activity started for this request, if tracing is enabled.
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            request_id: request_id_of(parts.extensions.get::<RequestId>(), &parts.headers),
            trace: parts.extensions.get::<TraceContext>().copied(),
        }
    }

    /// The activity id when a trace is active, otherwise the request id.
    pub fn trace_identifier(&self) -> Option<String> {
        self.trace
            .as_ref()
            .map(TraceContext::id)
            .or_else(|| self.request_id.clone())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
