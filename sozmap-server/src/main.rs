//! Sozmap Server - serves the word map read from Google Sheets

use anyhow::{Context, Result};
use sozmap_server::{config::ServerConfig, routes, state};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sozmap_server=debug,sozmap_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // Authenticate before binding so bad credentials never serve traffic
    let state = state::AppState::new(&config)
        .await
        .context("Failed to authenticate with Google API")?;

    // Build router
    let app = routes::create_router(state);

    // Start server
    let addr = SocketAddr::from((config.host, config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
