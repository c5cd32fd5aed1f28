//! Estimator HTTP server.
//!
//! Loads a rate configuration directory and serves `POST /estimate`.

use std::net::SocketAddr;
use std::path::PathBuf;

use asphalt_estimator::api::{AppState, create_router};
use asphalt_estimator::config::ConfigLoader;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Asphalt paving estimator server
#[derive(Parser, Debug)]
#[command(name = "asphalt-estimator")]
#[command(about = "Serve cost estimates and quotes for asphalt paving projects")]
struct Args {
    /// Directory holding estimator.yaml, labor.yaml, equipment.yaml,
    /// traffic_control.yaml and pricing.yaml
    #[arg(long, default_value = "./config/standard")]
    config: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let loader = ConfigLoader::load(&args.config)?;
    let metadata = loader.metadata();
    tracing::info!(
        config = %args.config.display(),
        rates = %metadata.code,
        version = %metadata.version,
        "Loaded estimator configuration"
    );

    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(address = %args.bind, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
