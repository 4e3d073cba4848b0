//! Breedwise - Main Entry Point
//!
//! Dog breed image classification service: loads a label table and a
//! pretrained model, then serves predictions over HTTP.

use std::path::PathBuf;

use clap::Parser;

use breedwise::server::{run_server, ServerConfig};

#[derive(Parser)]
#[command(name = "breedwise", version, about = "Dog breed classification service")]
struct Cli {
    /// Listen address (overrides HOST env var)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT env var, default 5000)
    #[arg(long)]
    port: Option<u16>,

    /// Path to the ONNX model artifact (overrides MODEL_PATH env var)
    #[arg(long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Path to the labels CSV (overrides LABELS_PATH env var)
    #[arg(long, value_name = "PATH")]
    labels: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breedwise=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ServerConfig::default();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    if let Some(labels) = cli.labels {
        config.labels_path = labels;
    }

    if let Err(e) = run_server(config).await {
        tracing::error!(error = %e, "Startup failed, refusing to serve");
        return Err(e);
    }

    Ok(())
}
