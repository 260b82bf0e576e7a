//! velopath HTTP service
//!
//! Loads an OSM extract into a street model at startup and serves the
//! route-planning API over HTTP.

mod config;
mod error;
mod geocoder;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use velopath_core::loading::create_street_model;

use crate::config::ServerConfig;
use crate::geocoder::Geocoder;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "velopath-server", about = "Bicycle route planning service")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "velopath.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_path(&cli.config)?;

    info!("Loading street model from {}", config.osm_path.display());
    let model_config = config.model_config();
    let model = tokio::task::spawn_blocking(move || create_street_model(&model_config)).await??;
    info!(
        "Model ready: {} nodes, {} edges, {} named ways",
        model.graph.node_count(),
        model.graph.edge_count(),
        model.streets.len()
    );

    let state = Arc::new(AppState {
        weights: config.weights.to_weights()?,
        geocoder: Geocoder::new(&config.geocoder)?,
        model: RwLock::new(model),
    });

    let listener = TcpListener::bind(config.listen).await?;
    info!("Listening on {}", config.listen);
    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown handler: {err}");
    }
}
