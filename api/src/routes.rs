use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use shared::report::test_notification_message;
use tracing::{info, warn};

use crate::StatusState;

const SERVICE_NAME: &str = "Trading Bot";
const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn home(State(state): State<StatusState>) -> Json<Value> {
    let now = state.schedule.localize(&Utc::now());
    Json(json!({
        "status": "active",
        "service": SERVICE_NAME,
        "assets": state.assets.as_slice(),
        "last_checked": now.format(CLOCK_FORMAT).to_string(),
        "version": format!("{} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn status(State(state): State<StatusState>) -> Json<Value> {
    let now = Utc::now();
    let trade_type = state.schedule.match_slot(&now);

    Json(json!({
        "status": "running",
        "current_time": state.schedule.localize(&now).format(CLOCK_FORMAT).to_string(),
        "should_trade": trade_type.is_some(),
        "trade_type": trade_type,
        "next_check": "every_minute",
    }))
}

pub async fn test_notification(State(state): State<StatusState>) -> Json<Value> {
    let success = state.notifier.send(&test_notification_message()).await;
    if success {
        info!("✅ Test notification delivered");
    } else {
        warn!("⚠️ Test notification was not delivered");
    }

    Json(json!({
        "success": success,
        "message": "Test notification sent",
    }))
}
