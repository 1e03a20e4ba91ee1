//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the home actions
//! - Wire up middleware (request ID, trace context, tracing, timeout)
//! - Bind server to listener
//! - Record request metrics

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SiteConfig;
use crate::home::{controller, HomeController, SiteView, ViewResult};
use crate::http::request::{make_request_span, MakeRequestUuidV4, RequestContext, X_REQUEST_ID};
use crate::observability::{metrics, trace_context::trace_context_middleware, AppLogger, TracingLogger};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<HomeController>,
    pub views: Arc<SiteView>,
}

impl AppState {
    fn respond(&self, action: &'static str, start: Instant, result: ViewResult) -> Response {
        let response = self.views.render(result);
        metrics::record_request(action, response.status().as_u16(), start);
        response
    }
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    config: SiteConfig,
}

impl HttpServer {
    /// Create a server whose controller logs through `tracing`.
    pub fn new(config: SiteConfig) -> Self {
        Self::with_logger(config, Arc::new(TracingLogger::new(controller::CATEGORY)))
    }

    /// Create a server whose controller logs through `logger`.
    pub fn with_logger(config: SiteConfig, logger: Arc<dyn AppLogger>) -> Self {
        let state = AppState {
            controller: Arc::new(HomeController::new(logger)),
            views: Arc::new(SiteView::new(config.site.title.clone())),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: request id, then trace context, then the
    /// request span, then the timeout.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/Home", get(index))
            .route("/Home/Index", get(index))
            .route("/Home/Privacy", get(privacy))
            .route("/Home/Error", get(error))
            .fallback(not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(middleware::from_fn_with_state(
                config.observability.tracing_enabled,
                trace_context_middleware,
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

async fn index(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let result = state.controller.index();
    state.respond("index", start, result)
}

async fn privacy(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let result = state.controller.privacy();
    state.respond("privacy", start, result)
}

async fn error(State(state): State<AppState>, context: RequestContext) -> Response {
    let start = Instant::now();
    let result = state.controller.error(&context);
    state.respond("error", start, result)
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No page matched");
    (StatusCode::NOT_FOUND, "Page not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use std::error::Error as StdError;
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct CountingLogger {
        levels: Mutex<Vec<&'static str>>,
    }

    impl AppLogger for CountingLogger {
        fn log_error(&self, _message: &str, _cause: &(dyn StdError + 'static)) {
            self.levels.lock().unwrap().push("error");
        }

        fn log_info(&self, _message: &str) {
            self.levels.lock().unwrap().push("info");
        }

        fn log_warning(&self, _message: &str) {
            self.levels.lock().unwrap().push("warning");
        }
    }

    fn server(tracing_enabled: bool) -> (HttpServer, Arc<CountingLogger>) {
        let mut config = SiteConfig::default();
        config.observability.tracing_enabled = tracing_enabled;
        let logger = Arc::new(CountingLogger::default());
        (HttpServer::with_logger(config, logger.clone()), logger)
    }

    async fn send(router: Router, request: Request<Body>) -> (Response, String) {
        let response = router.oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        (
            Response::from_parts(parts, Body::empty()),
            String::from_utf8(bytes.to_vec()).unwrap(),
        )
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_index_routes_log_and_succeed() {
        let (server, logger) = server(true);

        for path in ["/", "/Home", "/Home/Index"] {
            let (response, body) = send(server.router(), request(path)).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert!(body.contains("Welcome"));
        }

        assert_eq!(
            *logger.levels.lock().unwrap(),
            ["error", "info", "warning"].repeat(3)
        );
    }

    #[tokio::test]
    async fn test_privacy_is_silent() {
        let (server, logger) = server(true);

        let (response, body) = send(server.router(), request("/Home/Privacy")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body.contains("Privacy Policy"));
        assert!(logger.levels.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_continues_incoming_trace() {
        let (server, logger) = server(true);
        let request = Request::builder()
            .uri("/Home/Error")
            .header(
                "traceparent",
                "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01",
            )
            .body(Body::empty())
            .unwrap();

        let (response, body) = send(server.router(), request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body.contains("<code>00-0af7651916cd43dd8448eb211c80319c-"));
        assert!(!body.contains("b7ad6b7169203331-01</code>"));
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "no-store, no-cache, max-age=0"
        );
        assert_eq!(response.headers()[header::PRAGMA], "no-cache");
        assert!(logger.levels.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_without_tracing_shows_request_id() {
        let (server, _logger) = server(false);

        let (response, body) = send(server.router(), request("/Home/Error")).await;

        let request_id = response.headers()["x-request-id"].to_str().unwrap();
        assert!(body.contains(&format!("<code>{request_id}</code>")));
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_kept() {
        let (server, _logger) = server(false);
        let request = Request::builder()
            .uri("/Home/Error")
            .header("x-request-id", "caller-42")
            .body(Body::empty())
            .unwrap();

        let (response, body) = send(server.router(), request).await;

        assert_eq!(response.headers()["x-request-id"], "caller-42");
        assert!(body.contains("<code>caller-42</code>"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (server, logger) = server(true);

        let (response, _) = send(server.router(), request("/nope")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(logger.levels.lock().unwrap().is_empty());
    }
}
