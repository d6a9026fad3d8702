//! Drives the monitor against a local axum "status page".
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use status_monitor_bot::config::SettingsDefaults;
use status_monitor_bot::database::models::{SettingField, SettingValue};
use status_monitor_bot::database::{DbPool, connect_in_memory, downtimes, logs, settings};
use status_monitor_bot::monitor::probe::check_status_page;
use status_monitor_bot::monitor::worker::transition_message;
use status_monitor_bot::monitor::{Monitor, ProbeOutcome, Transition};
use status_monitor_bot::notify::{Notification, OwnerNotifier};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn contents(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.content.clone())
            .collect()
    }
}

#[async_trait]
impl OwnerNotifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

type Page = Arc<Mutex<String>>;

async fn serve_page(body: &str) -> (String, Page) {
    let page: Page = Arc::new(Mutex::new(body.to_string()));
    let app = Router::new()
        .route(
            "/",
            get(|State(page): State<Page>| async move { page.lock().unwrap().clone() }),
        )
        .with_state(page.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    (format!("http://{addr}/"), page)
}

fn monitor(pool: &DbPool, url: &str, notifier: Arc<RecordingNotifier>) -> Monitor {
    Monitor::new(
        pool.clone(),
        reqwest::Client::new(),
        url,
        "Maxy",
        SettingsDefaults::default(),
        notifier,
    )
}

fn set_page(page: &Page, body: &str) {
    *page.lock().unwrap() = body.to_string();
}

#[tokio::test]
async fn probe_matches_keyword_case_insensitively() {
    let (url, page) = serve_page("<h1>All Systems ONLINE</h1>").await;
    let client = reqwest::Client::new();
    let outcome = check_status_page(&client, &url, "online", Duration::from_secs(5)).await;
    assert_eq!(outcome, ProbeOutcome::Online);

    set_page(&page, "<h1>Major outage</h1>");
    let outcome = check_status_page(&client, &url, "online", Duration::from_secs(5)).await;
    assert_eq!(outcome, ProbeOutcome::Offline);
}

#[tokio::test]
async fn unreachable_page_counts_as_offline() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let outcome = check_status_page(
        &reqwest::Client::new(),
        &format!("http://{addr}/"),
        "Online",
        Duration::from_secs(2),
    )
    .await;
    assert!(matches!(outcome, ProbeOutcome::Unreachable(_)));
    assert!(!outcome.is_online());
}

#[tokio::test]
async fn full_outage_cycle_logs_and_notifies() {
    let pool = connect_in_memory().await.unwrap();
    let (url, page) = serve_page("status: Online").await;
    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = monitor(&pool, &url, notifier.clone());

    let report = monitor.run_check_once().await.unwrap();
    assert_eq!(report.transition, Transition::CameOnline);

    let report = monitor.run_check_once().await.unwrap();
    assert_eq!(report.transition, Transition::None);

    set_page(&page, "status: down");
    let report = monitor.run_check_once().await.unwrap();
    assert!(matches!(report.transition, Transition::WentOffline { .. }));
    let open = downtimes::last_downtime(&pool).await.unwrap().expect("incident");
    assert!(open.is_open());

    set_page(&page, "status: online again");
    let report = monitor.run_check_once().await.unwrap();
    assert!(matches!(report.transition, Transition::BackOnline { .. }));
    let closed = downtimes::last_downtime(&pool).await.unwrap().expect("incident");
    assert_eq!(closed.end_ts, Some(report.checked_at));

    let contents = notifier.contents();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0], format!("✅ **Maxy is ONLINE**\n{url}"));
    assert!(contents[1].starts_with("🔴 **Maxy is OFFLINE**"));
    assert!(contents[1].contains("Keyword `Online` not found"));
    assert!(contents[2].starts_with("✅ **Maxy is BACK ONLINE**\nDowntime: "));

    // One log row per check, 3 of 4 up.
    assert_eq!(logs::uptime_percent_since(&pool, 0).await.unwrap(), 75.0);
}

#[tokio::test]
async fn keyword_and_channel_come_from_settings() {
    let pool = connect_in_memory().await.unwrap();
    let (url, _page) = serve_page("All systems operational").await;
    settings::update_setting(
        &pool,
        SettingField::ResponseKeyword,
        SettingValue::Text(Some("Operational".into())),
    )
    .await
    .unwrap();
    settings::update_setting(
        &pool,
        SettingField::ChannelId,
        SettingValue::Text(Some("424242".into())),
    )
    .await
    .unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = monitor(&pool, &url, notifier.clone());

    let report = monitor.run_check_once().await.unwrap();
    assert_eq!(report.outcome, ProbeOutcome::Online);
    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent[0].channel, Some(424242));
}

#[tokio::test]
async fn restart_during_outage_reports_recovery() {
    let pool = connect_in_memory().await.unwrap();
    downtimes::start_downtime(&pool, 1_000).await.unwrap();
    let (url, page) = serve_page("still broken").await;
    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = monitor(&pool, &url, notifier.clone());
    monitor.restore().await.unwrap();

    // Still down: no second incident, no message.
    let report = monitor.run_check_once().await.unwrap();
    assert_eq!(report.transition, Transition::None);
    assert!(notifier.contents().is_empty());

    set_page(&page, "Online");
    let report = monitor.run_check_once().await.unwrap();
    match report.transition {
        Transition::BackOnline { started, .. } => assert_eq!(started, 1_000),
        other => panic!("unexpected transition {other:?}"),
    }
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM downtimes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn failed_incident_write_is_retried_next_check() {
    let pool = connect_in_memory().await.unwrap();
    let (url, page) = serve_page("Online").await;
    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = monitor(&pool, &url, notifier.clone());
    monitor.run_check_once().await.unwrap();

    set_page(&page, "down");
    sqlx::query("ALTER TABLE downtimes RENAME TO downtimes_offline")
        .execute(&pool)
        .await
        .unwrap();
    assert!(monitor.run_check_once().await.is_err());
    assert_eq!(notifier.contents().len(), 1);

    sqlx::query("ALTER TABLE downtimes_offline RENAME TO downtimes")
        .execute(&pool)
        .await
        .unwrap();
    let report = monitor.run_check_once().await.unwrap();
    assert!(matches!(report.transition, Transition::WentOffline { .. }));
    let open = downtimes::last_downtime(&pool).await.unwrap().expect("incident");
    assert!(open.is_open());
    let contents = notifier.contents();
    assert_eq!(contents.len(), 2);
    assert!(contents[1].starts_with("🔴 **Maxy is OFFLINE**"));
}

#[tokio::test]
async fn oversized_interval_does_not_stop_the_loop() {
    let pool = connect_in_memory().await.unwrap();
    settings::update_setting(&pool, SettingField::IntervalMin, SettingValue::Integer(i64::MAX))
        .await
        .unwrap();
    let (url, _page) = serve_page("Online").await;
    let notifier = Arc::new(RecordingNotifier::default());
    let handle = tokio::spawn(Arc::new(monitor(&pool, &url, notifier.clone())).run_loop());

    for _ in 0..50 {
        if !notifier.contents().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(notifier.contents().len(), 1);
    assert!(!handle.is_finished());
    handle.abort();
}

#[test]
fn messages_per_transition() {
    let url = "https://status.example.com";
    assert_eq!(transition_message("Maxy", url, "Online", Transition::None), None);
    assert_eq!(
        transition_message(
            "Maxy",
            url,
            "Online",
            Transition::BackOnline {
                started: 0,
                downtime_secs: 42
            }
        )
        .as_deref(),
        Some("✅ **Maxy is BACK ONLINE**\nDowntime: 42s\nhttps://status.example.com")
    );
    assert_eq!(
        transition_message("Maxy", url, "Up", Transition::WentOffline { started: 0 }).as_deref(),
        Some(
            "🔴 **Maxy is OFFLINE**\nhttps://status.example.com\n(Keyword `Up` not found or fetch error)"
        )
    );
}
