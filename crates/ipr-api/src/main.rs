//! # ipr-api -- Binary Entry Point
//!
//! Starts the Axum HTTP server. Both external-service clients are
//! constructed from the environment before the listener binds: a missing
//! or malformed credential aborts startup instead of failing the first
//! request.

use ipr_api::{AppConfig, AppState};
use ipr_pinata::{PinataClient, PinataConfig};
use ipr_story::{StoryClient, StoryConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let pinata_config = PinataConfig::from_env().map_err(|e| {
        tracing::error!("Pinata configuration failed: {e}");
        e
    })?;
    let pinata = PinataClient::new(pinata_config).map_err(|e| {
        tracing::error!("Pinata client construction failed: {e}");
        e
    })?;
    tracing::info!("pinning client configured");

    let story_config = StoryConfig::from_env().map_err(|e| {
        tracing::error!("Story configuration failed: {e}");
        e
    })?;
    let story = StoryClient::new(story_config).map_err(|e| {
        tracing::error!("Story client construction failed: {e}");
        e
    })?;

    let port = config.port;
    let state = AppState::new(config, pinata, story);
    let app = ipr_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("IP registrar API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
