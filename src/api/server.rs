//! Receipts web server
//!
//! Axum server with the upload form, the upload handler and archive
//! downloads. Blocking batch work runs on the tokio blocking pool.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::batch::{BatchId, BatchRunner};
use crate::config::BatchConfig;

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub batch: BatchConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            batch: BatchConfig::default(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub runner: BatchRunner,
    /// Most recent batch this process completed, served by `GET /download`
    pub latest: Mutex<Option<BatchId>>,
}

impl AppState {
    pub fn new(batch: BatchConfig) -> Self {
        Self {
            runner: BatchRunner::new(batch),
            latest: Mutex::new(None),
        }
    }

    pub fn latest_batch(&self) -> Option<BatchId> {
        *self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_latest_batch(&self, id: BatchId) {
        *self.latest.lock().unwrap_or_else(|e| e.into_inner()) = Some(id);
    }
}

/// Build the router over `state`
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::upload))
        .route("/download", get(handlers::download_latest))
        .route("/download/:batch_id", get(handlers::download_batch))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Install the global tracing subscriber (`RUST_LOG` overrides the default filter)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dues_receipts=info,receipts=info,receipts_server=info,tower_http=info".into()
            }),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the server until SIGINT/SIGTERM
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.batch.clone()));
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Receipts server starting on http://{}", addr);
    info!(
        "   Output: {}, format: {}",
        config.batch.output_dir.display(),
        config.batch.format
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Receipts server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
