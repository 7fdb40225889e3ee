//! Binary entry point for the roster engine HTTP server.

use std::env;
use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use roster_engine::api::{create_router, AppState};
use roster_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("ROSTER_CONFIG_DIR").unwrap_or_else(|_| "./config".to_string());
    let loader = ConfigLoader::load(&config_dir)?;
    info!(company = %loader.company().name, "Configuration loaded");

    let state = AppState::new(loader.company().clone());
    let router = create_router(state);

    let addr = env::var("ROSTER_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Roster engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
