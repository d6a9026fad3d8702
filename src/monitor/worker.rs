use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use super::probe::{ProbeOutcome, check_status_page};
use super::tracker::{StatusTracker, Transition};
use crate::config::SettingsDefaults;
use crate::constants::{MAX_CHECK_INTERVAL_MINUTES, MIN_CHECK_INTERVAL_MINUTES};
use crate::database::{self, DbPool};
use crate::error::BotResult;
use crate::notify::{Notification, OwnerNotifier};
use crate::util::now_ms;

/// Result of one check, returned for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub outcome: ProbeOutcome,
    pub transition: Transition,
    pub checked_at: i64,
}

/// Everything a check needs. One instance lives for the whole process.
pub struct Monitor {
    db: DbPool,
    client: reqwest::Client,
    status_page_url: String,
    monitor_name: String,
    defaults: SettingsDefaults,
    notifier: Arc<dyn OwnerNotifier>,
    tracker: Mutex<StatusTracker>,
}

impl Monitor {
    pub fn new(
        db: DbPool,
        client: reqwest::Client,
        status_page_url: impl Into<String>,
        monitor_name: impl Into<String>,
        defaults: SettingsDefaults,
        notifier: Arc<dyn OwnerNotifier>,
    ) -> Self {
        Self {
            db,
            client,
            status_page_url: status_page_url.into(),
            monitor_name: monitor_name.into(),
            defaults,
            notifier,
            tracker: Mutex::new(StatusTracker::new()),
        }
    }

    /// Picks up an outage left open by a previous run so recovery is reported with its full length.
    pub async fn restore(&self) -> BotResult<()> {
        if let Some(last) = database::downtimes::last_downtime(&self.db).await?
            && last.is_open()
        {
            info!(target = "monitor", started = last.start_ts, "resuming open downtime");
            *self.tracker.lock().await = StatusTracker::resume_outage(last.start_ts);
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn run_check_once(&self) -> BotResult<CheckReport> {
        let settings = database::settings::get_settings(&self.db, &self.defaults).await?;
        let timeout = Duration::from_secs(settings.timeout_s.max(1) as u64);
        let outcome = check_status_page(
            &self.client,
            &self.status_page_url,
            &settings.response_keyword,
            timeout,
        )
        .await;

        let checked_at = now_ms();
        database::logs::insert_log(&self.db, checked_at, outcome.is_online()).await?;

        // The tracker only moves once the incident row matches it, so a failed
        // write is retried as the same transition on the next check.
        let mut tracker = self.tracker.lock().await;
        let mut next = tracker.clone();
        let transition = next.observe(outcome.is_online(), checked_at);
        match transition {
            Transition::WentOffline { started } => {
                database::downtimes::start_downtime(&self.db, started).await?
            }
            Transition::BackOnline { .. } => {
                database::downtimes::end_last_downtime(&self.db, checked_at).await?
            }
            Transition::CameOnline | Transition::None => {}
        }
        *tracker = next;
        drop(tracker);

        if let Some(content) = transition_message(
            &self.monitor_name,
            &self.status_page_url,
            &settings.response_keyword,
            transition,
        ) {
            self.notifier
                .notify(Notification::text(content).with_channel(settings.channel()))
                .await;
            info!(target = "monitor", ?transition, "status change announced");
        }

        Ok(CheckReport {
            outcome,
            transition,
            checked_at,
        })
    }

    /// Checks forever, re-reading the interval from the settings table every round.
    pub async fn run_loop(self: Arc<Self>) {
        if let Err(e) = self.restore().await {
            error!(target = "monitor", error = %e, "failed to restore downtime state");
        }
        loop {
            if let Err(e) = self.run_check_once().await {
                error!(target = "monitor", error = %e, "monitor check failed");
            }
            let interval_min = match database::settings::get_settings(&self.db, &self.defaults).await {
                Ok(s) => s.interval_min,
                Err(_) => self.defaults.interval_min,
            };
            tokio::time::sleep(check_interval(interval_min)).await;
        }
    }
}

/// Sleep between checks for a stored interval, clamped to the accepted range.
pub fn check_interval(interval_min: i64) -> Duration {
    let minutes = interval_min.clamp(MIN_CHECK_INTERVAL_MINUTES, MAX_CHECK_INTERVAL_MINUTES) as u64;
    Duration::from_secs(minutes.saturating_mul(60))
}

/// Owner-facing text for a transition; `None` when nothing changed.
pub fn transition_message(
    name: &str,
    url: &str,
    keyword: &str,
    transition: Transition,
) -> Option<String> {
    match transition {
        Transition::None => None,
        Transition::CameOnline => Some(format!("✅ **{name} is ONLINE**\n{url}")),
        Transition::BackOnline { downtime_secs, .. } => Some(format!(
            "✅ **{name} is BACK ONLINE**\nDowntime: {downtime_secs}s\n{url}"
        )),
        Transition::WentOffline { .. } => Some(format!(
            "🔴 **{name} is OFFLINE**\n{url}\n(Keyword `{keyword}` not found or fetch error)"
        )),
    }
}
