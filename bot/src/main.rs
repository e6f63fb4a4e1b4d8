use std::sync::Arc;

use anyhow::Result;
use shared::report::startup_message;
use tracing_subscriber::EnvFilter;

mod services;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting RSI signal bot...");

    let app_state = AppState::new()?;
    tracing::info!("AppState initialized");

    // Polling loop runs beside the status server for the life of the process
    let _signal_loop = Arc::new(app_state.signal_cycle()).spawn();

    if app_state.notifier.send(&startup_message()).await {
        tracing::info!("✅ Startup notification sent");
    } else {
        tracing::warn!("⚠️ Startup notification failed");
    }

    api::serve(app_state.config.port, app_state.status_state()).await?;

    Ok(())
}
