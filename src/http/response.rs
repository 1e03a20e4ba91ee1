//! Response construction.
//!
//! # Responsibilities
//! - Turn rendered pages into HTML responses
//! - Translate a per-action cache policy into `Cache-Control` / `Pragma`

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// Where a response may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLocation {
    /// Any cache, shared or private.
    Any,
    /// Only the client's own cache.
    Client,
    /// Nowhere without revalidation.
    None,
}

/// Caching policy attached to an action result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseCache {
    pub duration_secs: u32,
    pub location: CacheLocation,
    pub no_store: bool,
}

impl ResponseCache {
    /// Policy that forbids storing the response anywhere.
    pub const fn disabled() -> Self {
        Self {
            duration_secs: 0,
            location: CacheLocation::None,
            no_store: true,
        }
    }

    /// `Cache-Control` directives for this policy.
    pub fn cache_control(&self) -> String {
        let mut directives = Vec::with_capacity(3);
        if self.no_store {
            directives.push("no-store".to_string());
        }
        directives.push(
            match self.location {
                CacheLocation::Any => "public",
                CacheLocation::Client => "private",
                CacheLocation::None => "no-cache",
            }
            .to_string(),
        );
        directives.push(format!("max-age={}", self.duration_secs));
        directives.join(", ")
    }

    /// Write the policy's headers, replacing any existing ones.
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.cache_control()) {
            headers.insert(header::CACHE_CONTROL, value);
        }
        if self.location == CacheLocation::None {
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        }
    }
}

/// 200 HTML response, with the cache policy applied when present.
pub fn html_response(body: String, cache: Option<&ResponseCache>) -> Response {
    let mut response = (StatusCode::OK, Html(body)).into_response();
    if let Some(cache) = cache {
        cache.apply(response.headers_mut());
    }
    response
}
