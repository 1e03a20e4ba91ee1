//! Distributed tracing support.
//!
//! # Responsibilities
//! - Extract W3C trace context (`traceparent`) from incoming requests
//! - Start a per-request activity: a child of the caller's span, or a new root
//! - Expose the activity to handlers through request extensions
//!
//! # Design Decisions
//! - Only version `00` fields are interpreted; later versions are read as
//!   their first four fields, `ff` is rejected
//! - Disabled tracing attaches nothing, so handlers fall back to the request id

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use rand::Rng;

/// Incoming trace context header.
pub const TRACEPARENT: &str = "traceparent";

const VERSION: &str = "00";
const INVALID_VERSION: &str = "ff";
const SAMPLED: u8 = 0x01;

/// Trace context received from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentContext {
    pub trace_id: [u8; 16],
    pub span_id: [u8; 8],
    pub flags: u8,
}

impl ParentContext {
    /// Parse a `traceparent` header value.
    pub fn parse(header: &str) -> Option<Self> {
        let header = header.trim();
        let mut fields = header.split('-');
        let version = fields.next()?;
        let trace_id = fields.next()?;
        let span_id = fields.next()?;
        let flags = fields.next()?;

        if version.len() != 2 || !is_lower_hex(version) || version == INVALID_VERSION {
            return None;
        }
        if version == VERSION && fields.next().is_some() {
            return None;
        }

        let trace_id: [u8; 16] = decode_field(trace_id)?;
        let span_id: [u8; 8] = decode_field(span_id)?;
        let [flags]: [u8; 1] = decode_field(flags)?;

        if is_zero(&trace_id) || is_zero(&span_id) {
            return None;
        }

        Some(Self {
            trace_id,
            span_id,
            flags,
        })
    }
}

/// The activity started for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceContext {
    trace_id: [u8; 16],
    span_id: [u8; 8],
    parent_span_id: Option<[u8; 8]>,
    flags: u8,
}

impl TraceContext {
    /// Start a new trace with no parent.
    pub fn new_root() -> Self {
        Self {
            trace_id: random_nonzero(),
            span_id: random_nonzero(),
            parent_span_id: None,
            flags: 0,
        }
    }

    /// Start a span within the caller's trace.
    pub fn child_of(parent: &ParentContext) -> Self {
        Self {
            trace_id: parent.trace_id,
            span_id: random_nonzero(),
            parent_span_id: Some(parent.span_id),
            flags: parent.flags,
        }
    }

    /// Continue the trace described by `traceparent`, or start a new one.
    pub fn from_traceparent(header: Option<&str>) -> Self {
        match header.and_then(ParentContext::parse) {
            Some(parent) => Self::child_of(&parent),
            None => Self::new_root(),
        }
    }

    /// Activity identifier, in `traceparent` format.
    pub fn id(&self) -> String {
        format!(
            "{}-{}-{}-{:02x}",
            VERSION,
            self.trace_id_hex(),
            self.span_id_hex(),
            self.flags
        )
    }

    pub fn trace_id_hex(&self) -> String {
        hex::encode(self.trace_id)
    }

    pub fn span_id_hex(&self) -> String {
        hex::encode(self.span_id)
    }

    pub fn parent_span_id_hex(&self) -> Option<String> {
        self.parent_span_id.map(hex::encode)
    }

    pub fn is_sampled(&self) -> bool {
        self.flags & SAMPLED == SAMPLED
    }
}

/// Middleware attaching a [`TraceContext`] to every request when enabled.
pub async fn trace_context_middleware(
    State(enabled): State<bool>,
    mut request: Request,
    next: Next,
) -> Response {
    if enabled {
        let header = request
            .headers()
            .get(TRACEPARENT)
            .and_then(|v| v.to_str().ok());
        let context = TraceContext::from_traceparent(header);

        tracing::trace!(
            activity_id = %context.id(),
            parent_span_id = ?context.parent_span_id_hex(),
            "Activity started"
        );
        request.extensions_mut().insert(context);
    }

    next.run(request).await
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn is_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| *b == 0)
}

fn decode_field<const N: usize>(field: &str) -> Option<[u8; N]> {
    if field.len() != N * 2 || !is_lower_hex(field) {
        return None;
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(field, &mut out).ok()?;
    Some(out)
}

fn random_nonzero<const N: usize>() -> [u8; N] {
    let mut rng = rand::thread_rng();
    let mut bytes = [0u8; N];
    while is_zero(&bytes) {
        rng.fill(&mut bytes[..]);
    }
    bytes
}
