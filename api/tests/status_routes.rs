//! In-process tests for the status routes

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use api::{router, StatusState};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use shared::{Notifier, Schedule, ASSETS, MARKET_TZ};
use tower::ServiceExt;

struct CountingNotifier {
    calls: AtomicUsize,
    accept: bool,
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn send(&self, _text: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.accept
    }
}

fn state(schedule: Schedule, notifier: Arc<CountingNotifier>) -> StatusState {
    StatusState {
        assets: Arc::new(ASSETS.iter().map(|s| s.to_string()).collect()),
        schedule: Arc::new(schedule),
        notifier,
    }
}

fn notifier(accept: bool) -> Arc<CountingNotifier> {
    Arc::new(CountingNotifier {
        calls: AtomicUsize::new(0),
        accept,
    })
}

async fn get_json(state: StatusState, uri: &str) -> Value {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_always_healthy() {
    let body = get_json(state(Schedule::default(), notifier(true)), "/health").await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn home_lists_assets() {
    let body = get_json(state(Schedule::default(), notifier(true)), "/").await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["service"], "Trading Bot");
    assert_eq!(body["assets"].as_array().unwrap().len(), ASSETS.len());
    assert_eq!(body["assets"][0], "BTC-USD");
    assert!(body["last_checked"].is_string());
}

#[tokio::test]
async fn status_without_slots_never_trades() {
    let body = get_json(state(Schedule::new(MARKET_TZ, Vec::new()), notifier(true)), "/status").await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["should_trade"], false);
    assert!(body["trade_type"].is_null());
    assert_eq!(body["next_check"], "every_minute");
}

#[tokio::test]
async fn status_is_consistent_with_matcher() {
    let body = get_json(state(Schedule::default(), notifier(true)), "/status").await;
    let should_trade = body["should_trade"].as_bool().unwrap();
    assert_eq!(should_trade, !body["trade_type"].is_null());
}

#[tokio::test]
async fn test_notification_reports_delivery() {
    let accepting = notifier(true);
    let body = get_json(state(Schedule::default(), accepting.clone()), "/test-notification").await;
    assert_eq!(body["success"], true);
    assert_eq!(accepting.calls.load(Ordering::SeqCst), 1);

    let rejecting = notifier(false);
    let body = get_json(state(Schedule::default(), rejecting.clone()), "/test-notification").await;
    assert_eq!(body["success"], false);
    assert_eq!(rejecting.calls.load(Ordering::SeqCst), 1);
}
