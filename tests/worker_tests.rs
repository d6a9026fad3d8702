//! Keep-alive rounds against a local counter endpoint, and the once-only worker start.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use status_monitor_bot::AppState;
use status_monitor_bot::config::{BotConfig, SettingsDefaults};
use status_monitor_bot::database::models::{SettingField, SettingValue};
use status_monitor_bot::database::{connect_in_memory, settings};
use status_monitor_bot::monitor::autoping::ping_round;

async fn serve_counter() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/ping",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "pong"
            }),
        )
        .with_state(hits.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    (format!("http://{addr}/ping"), hits)
}

#[tokio::test]
async fn keep_alive_follows_live_settings() {
    let pool = connect_in_memory().await.unwrap();
    let client = reqwest::Client::new();
    let defaults = SettingsDefaults::default();
    let (url, hits) = serve_counter().await;

    // No URL configured: nothing is hit, default cadence.
    let wait = ping_round(&pool, &client, &defaults).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(wait, Duration::from_secs(300));

    settings::update_setting(&pool, SettingField::AutoPingUrl, SettingValue::Text(Some(url)))
        .await
        .unwrap();
    settings::update_setting(&pool, SettingField::AutoPingIntervalS, SettingValue::Integer(45))
        .await
        .unwrap();
    let wait = ping_round(&pool, &client, &defaults).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(wait, Duration::from_secs(45));

    settings::update_setting(&pool, SettingField::AutoPingUrl, SettingValue::Text(None))
        .await
        .unwrap();
    ping_round(&pool, &client, &defaults).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unreachable_keep_alive_url_still_schedules_next_round() {
    let pool = connect_in_memory().await.unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    settings::update_setting(
        &pool,
        SettingField::AutoPingUrl,
        SettingValue::Text(Some(format!("http://{addr}/"))),
    )
    .await
    .unwrap();
    let wait = ping_round(&pool, &reqwest::Client::new(), &SettingsDefaults::default()).await;
    assert_eq!(wait, Duration::from_secs(300));
}

#[tokio::test]
async fn workers_are_claimed_once() {
    let pool = connect_in_memory().await.unwrap();
    let config = BotConfig::from_lookup(|key: &str| match key {
        "BOT_TOKEN" => Some("token".to_string()),
        "OWNER_USER_IDS" => Some("111".to_string()),
        "STATUS_PAGE_URL" => Some("https://status.example.com".to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppState::new(pool, Arc::new(config), reqwest::Client::new());
    assert!(state.claim_worker_start());
    assert!(!state.claim_worker_start());
    assert!(!state.claim_worker_start());
}
