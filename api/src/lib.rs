//! Status surface for uptime monitoring.
//!
//! Everything here is read-only: schedule state is recomputed from the
//! matcher on each request and never shared with the polling loop.

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use shared::{Notifier, Schedule};
use tower_http::trace::TraceLayer;
use tracing::info;

mod routes;

/// Dependencies handed to every handler.
#[derive(Clone)]
pub struct StatusState {
    pub assets: Arc<Vec<String>>,
    pub schedule: Arc<Schedule>,
    pub notifier: Arc<dyn Notifier>,
}

pub fn router(state: StatusState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/health", get(routes::health_check))
        .route("/status", get(routes::status))
        .route("/test-notification", get(routes::test_notification))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `0.0.0.0:port` and serves until the process exits.
pub async fn serve(port: u16, state: StatusState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Status server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
