//! API Router
//!
//! Central routing configuration.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    config::Config,
    webhooks::{webhook_router, EventSink, IngestState, SignatureCheck, SigningSecret},
};

/// Create the main application router.
pub fn create_router<S: EventSink>(config: &Config, ingest: IngestState<S>) -> Router {
    let check = SignatureCheck::new(
        SigningSecret::new(config.consumer_secret.as_str()),
        config.max_body_size,
    );

    Router::new()
        .route("/health", get(health_check))
        .merge(webhook_router(&config.webhook_path, check, ingest))
        // Middleware
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(TraceLayer::new_for_http())
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
