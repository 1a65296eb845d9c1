//! Ticket API /v1: HTTP front for the ticket verifier.
//!
//! Exposes `POST /v1/verify`, returning `{ valid, reason, extractedId }`.
//! Image upload and persistence stay with the caller.
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use ticket_verify::{ConfigError, TicketVerifier, VerifierConfig};
use tracing::info;

use config::ServerConfig;
use metrics::Metrics;

/// Shared, read-only state. The verifier is immutable, so no locking.
pub struct AppState {
    pub verifier: TicketVerifier,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(verifier: TicketVerifier) -> Result<Arc<Self>, prometheus::Error> {
        Ok(Arc::new(Self {
            verifier,
            metrics: Metrics::new()?,
        }))
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/verify", post(handlers::verify))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::cors())
        .layer(middleware::trace())
        .with_state(state)
}

/// Build the verifier from the configured YAML file, or the defaults
pub fn load_verifier(config: &ServerConfig) -> Result<TicketVerifier, ConfigError> {
    match &config.verifier_config {
        Some(path) => {
            info!("Loading verifier config from {}", path.display());
            TicketVerifier::from_config(&VerifierConfig::load(path)?)
        }
        None => Ok(TicketVerifier::default()),
    }
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let verifier = load_verifier(&config)?;
    info!(
        window_days = verifier.validity_window_days(),
        max_edit_distance = verifier.max_edit_distance(),
        "Ticket verifier ready"
    );

    let state = AppState::new(verifier)?;
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;

    info!("Ticket API listening on {}", config.addr);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}
