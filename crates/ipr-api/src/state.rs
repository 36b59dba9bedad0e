//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! Both external-service clients are constructed once at startup from
//! environment configuration and injected here; there is no hidden
//! global client and nothing request-scoped lives in state. Cloning is
//! cheap (the underlying HTTP clients are reference-counted).

use ipr_pinata::PinataClient;
use ipr_story::StoryClient;

/// Service-level configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the server binds to.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 3000)
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        Self { port }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: AppConfig,
    /// Pinning-service client.
    pub pinata: PinataClient,
    /// Registration-gateway client.
    pub story: StoryClient,
}

impl AppState {
    /// Assemble application state from configuration and clients.
    pub fn new(config: AppConfig, pinata: PinataClient, story: StoryClient) -> Self {
        Self {
            config,
            pinata,
            story,
        }
    }
}
