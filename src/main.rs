//! PlayerStats - Application Entry Point
//!
//! This is the main entry point for the PlayerStats server.

use std::{net::SocketAddr, sync::Arc};

use serde_json::json;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use playerstats::{
    config::{Config, LogFormat},
    db::{self, repositories::InMemoryPlayerRepository},
    handlers,
    services::{ErrorContext, ErrorHandler},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(&config);

    tracing::info!("Starting PlayerStats server...");

    // Seed the store; a bad data source aborts startup
    let errors = ErrorHandler;
    let repository = db::load_players(&config.seed.path)
        .and_then(InMemoryPlayerRepository::with_players)
        .map_err(|err| {
            errors.handle(
                err,
                ErrorContext::new("seed.load")
                    .with_metadata(json!({ "path": config.seed.path.display().to_string() })),
            )
        })?;

    // Create application state
    let state = AppState::new(Arc::new(repository), config.clone());

    // Build the router
    let app = handlers::create_router(state);

    // Start the server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing from `RUST_LOG`, falling back to the configured filter
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.rust_log));

    let registry = tracing_subscriber::registry().with(filter);

    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
