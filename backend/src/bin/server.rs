//! Freight routing HTTP server.
//!
//! Loads configuration, builds the repository, optionally seeds it, and serves
//! the REST API.
//!
//! # Usage
//!
//! ```bash
//! SEED_FILE=backend/data/seed.json cargo run --bin freight-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `ROUTING_CONFIG`: Path to `routing.toml` (default: searched)
//! - `REPOSITORY_TYPE`: Overrides the configured repository type
//! - `SEED_FILE`: JSON seed loaded at start-up
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use freight_routing::config::RoutingConfig;
use freight_routing::db::{RepositoryFactory, RepositoryType};
use freight_routing::http::{create_router, AppState};
use freight_routing::io::{apply_seed, load_seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting freight routing server");

    let config = RoutingConfig::load().context("Failed to load routing configuration")?;
    let repository = if env::var("REPOSITORY_TYPE").is_ok() {
        RepositoryFactory::create(RepositoryType::from_env())
    } else {
        RepositoryFactory::from_config(&config)?
    };
    info!(
        "Repository initialized; fees base={} per_mile={} minimum={}",
        config.fees.base_fee, config.fees.per_mile_rate, config.fees.minimum_fee
    );

    if let Ok(seed_path) = env::var("SEED_FILE") {
        let seed = load_seed(&seed_path)?;
        let summary = apply_seed(repository.as_ref(), seed).await?;
        info!(
            "Seeded from {}: {} depots, {} collection points, {} volumes",
            seed_path, summary.depots, summary.collection_points, summary.volumes.imported
        );
    }

    let app = create_router(AppState::with_fees(repository, config.fees));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
