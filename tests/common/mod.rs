//! Shared utilities for integration tests.

use std::error::Error as StdError;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log_showcase::config::SiteConfig;
use log_showcase::http::HttpServer;
use log_showcase::lifecycle::Shutdown;
use log_showcase::observability::AppLogger;
use tokio::net::TcpListener;

/// One record captured by [`RecordingLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    Error { message: String, cause: String },
    Info(String),
    Warning(String),
}

/// Logger that keeps every record in memory.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }
}

impl AppLogger for RecordingLogger {
    fn log_error(&self, message: &str, cause: &(dyn StdError + 'static)) {
        self.records.lock().unwrap().push(LogRecord::Error {
            message: message.to_string(),
            cause: cause.to_string(),
        });
    }

    fn log_info(&self, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push(LogRecord::Info(message.to_string()));
    }

    fn log_warning(&self, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push(LogRecord::Warning(message.to_string()));
    }
}

/// A site running on an ephemeral local port.
pub struct TestSite {
    pub addr: SocketAddr,
    pub logger: Arc<RecordingLogger>,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
}

impl TestSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the site with `config` and a recording logger.
pub async fn start_site(config: SiteConfig) -> TestSite {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let logger = Arc::new(RecordingLogger::default());
    let server = HttpServer::with_logger(config, logger.clone());
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    TestSite {
        addr,
        logger,
        shutdown,
        client,
    }
}
