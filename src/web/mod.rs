//! HTTP surface: upload page, JSON API, saved uploads and health.

pub mod handlers;
pub mod render;
pub mod upload;

use crate::catalog::{Catalog, Language};
use crate::config::Config;
use crate::constants::server::UPLOADS_ROUTE;
use crate::error::{Error, Result};
use crate::inference::LabelPredictor;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Model, if it loaded.
    pub predictor: Option<Arc<dyn LabelPredictor>>,
    /// Lookup tables.
    pub catalog: Arc<Catalog>,
    /// Where uploads are written and served from.
    pub upload_dir: Arc<PathBuf>,
    /// Language when the form does not pick one.
    pub default_language: Language,
    /// Request body limit.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create application state.
    pub fn new(
        predictor: Option<Arc<dyn LabelPredictor>>,
        catalog: Catalog,
        config: &Config,
    ) -> Self {
        Self {
            predictor,
            catalog: Arc::new(catalog),
            upload_dir: Arc::new(config.server.upload_dir.clone()),
            default_language: config.defaults.language,
            max_upload_bytes: config.server.max_upload_bytes,
        }
    }

    /// Whether predictions are available.
    pub fn model_loaded(&self) -> bool {
        self.predictor.is_some()
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.upload_dir.as_path());

    Router::new()
        .route("/", get(handlers::index).post(handlers::upload))
        .route("/api/predict", post(handlers::api_predict))
        .route("/health", get(handlers::health))
        .nest_service(UPLOADS_ROUTE, uploads)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    tokio::fs::create_dir_all(state.upload_dir.as_path())
        .await
        .map_err(|e| Error::UploadWrite {
            path: state.upload_dir.to_path_buf(),
            source: e,
        })?;

    let address = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| Error::ServerBind {
            address: address.clone(),
            source: e,
        })?;

    if !state.model_loaded() {
        warn!("Serving without a model; uploads will report it as not loaded");
    }
    info!("Listening on http://{address}");
    info!("Uploads stored in {}", state.upload_dir.display());

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
