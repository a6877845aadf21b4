//! HTTP handlers for the story test-case generator

mod health;
mod webhook;

pub use health::*;
pub use webhook::*;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::constants::WEBHOOK_ROUTE;

/// Build the application router
///
/// - `POST /jira-webhook` Jira issue events
/// - `GET /health` liveness
pub fn router(state: Arc<WebhookState>) -> Router {
    let webhook_routes = Router::new()
        .route(WEBHOOK_ROUTE, post(webhook_handler))
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health_check))
        .with_state(Arc::new(HealthState::new()));

    Router::new()
        .merge(webhook_routes)
        .merge(health_routes)
        .layer(TraceLayer::new_for_http())
}

/// Bind the listener; `host` may be an IP address or a hostname
pub async fn bind(server: &ServerConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind((server.host.as_str(), server.port)).await
}
