//! # ipr-api -- Axum HTTP service for IP asset registration
//!
//! The orchestration layer above the pinning gateway and the Story
//! Protocol registration gateway. Accepts a registration request,
//! captures and pins the content, builds and pins two metadata
//! documents, registers the asset on-chain, and returns transaction
//! identifiers.
//!
//! ## API Surface
//!
//! | Method | Path                                 | Operation              |
//! |--------|--------------------------------------|------------------------|
//! | POST   | `/api/v1/ip/register`                | Register a new asset   |
//! | POST   | `/api/v1/ip/register-existing-nft`   | Register existing NFT  |
//! | GET    | `/api/v1/ip/:ipId`                   | Asset detail           |
//! | GET    | `/health/liveness`                   | Liveness probe         |
//! | GET    | `/health/readiness`                  | Readiness probe        |
//!
//! ## Crate Policy
//!
//! - Sits at the top of the dependency DAG.
//! - Route handlers delegate to `orchestration`; no business logic in
//!   handlers.
//! - All errors map to the structured envelope via [`ApiError`].

pub mod error;
pub mod extractors;
pub mod orchestration;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::{AppConfig, AppState};

use axum::http::{Method, Uri};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the full application router.
///
/// Health probes stay outside the traced API surface so probe traffic
/// does not pollute request logs.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::ip::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe. Returns 200 whenever the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. Clients are constructed before the router exists,
/// so a serving process is a ready process.
async fn readiness() -> &'static str {
    "ready"
}

/// Fallback for unmatched routes: the uniform 404 envelope.
async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound(format!("{method} {uri}"))
}
