//! Breedwise Server Module
//!
//! HTTP front for the classification service. Loads the label table and
//! model once at startup (refusing to serve if either fails), then exposes
//! the REST API.

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::labels::LabelTable;
use crate::model::OnnxClassifier;
use crate::service::InferenceService;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            model_path: Self::resolve_asset("MODEL_PATH", "model/dogbreed.onnx"),
            labels_path: Self::resolve_asset("LABELS_PATH", "data/labels.csv"),
        }
    }
}

impl ServerConfig {
    /// Resolve an asset path: env var first, then install-relative
    /// candidates. Falls back to the relative path so the load error names
    /// something sensible.
    fn resolve_asset(env_key: &str, relative: &str) -> PathBuf {
        if let Ok(path) = std::env::var(env_key) {
            return PathBuf::from(path);
        }

        let candidates = [
            PathBuf::from(relative),
            Path::new(env!("CARGO_MANIFEST_DIR")).join(relative),
        ];
        for candidate in &candidates {
            if candidate.exists() {
                return candidate.clone();
            }
        }

        PathBuf::from(relative)
    }
}

/// Load the model and labels, then serve until shutdown.
///
/// Any load failure propagates before the listener is bound: the process
/// never serves requests with a half-initialized pipeline.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    info!(
        labels = %config.labels_path.display(),
        model = %config.model_path.display(),
        started_at = %start_time.to_rfc3339(),
        "Loading classifier assets"
    );

    let labels = LabelTable::load(&config.labels_path)?;
    info!(classes = labels.len(), "Label table loaded");

    let model = OnnxClassifier::load(&config.model_path)?;
    info!(model = %config.model_path.display(), "Model loaded");

    let service = InferenceService::new(Box::new(model), labels);
    let state = Arc::new(AppState::new(config.clone(), service));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        pid = std::process::id(),
        "Breedwise server listening and ready to accept connections"
    );
    info!(url = %format!("http://{}", addr), "Web UI available");
    info!(url = %format!("http://{}/predict", addr), "Prediction endpoint available");
    info!(url = %format!("http://{}/health", addr), "Health endpoint available");

    // Graceful shutdown on ctrl+c
    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        let stop_time = chrono::Utc::now();
        let uptime = stop_time.signed_duration_since(start_time);
        info!(
            stopped_at = %stop_time.to_rfc3339(),
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
    }
}
