//! Uptime summaries and the hourly series behind `/health` and `/status`.

use chrono::{DateTime, Duration, Utc};
use tracing::instrument;

use crate::constants::{CHART_BUCKETS, DAY_HOURS, HOUR_MS, MONTH_HOURS, WEEK_HOURS};
use crate::database::models::{CheckLog, Downtime};
use crate::database::{self, DbPool};
use crate::util::discord_timestamp;

#[derive(Debug, Clone, PartialEq)]
pub struct UptimeSummary {
    pub day: f64,
    pub week: f64,
    pub month: f64,
    pub last_incident: Option<Downtime>,
    pub last_check: Option<CheckLog>,
}

impl UptimeSummary {
    pub fn incident_text(&self) -> String {
        format_incident(self.last_incident)
    }

    /// "ONLINE", "OFFLINE" or "N/A" from the most recent check.
    pub fn current_label(&self) -> &'static str {
        match self.last_check {
            Some(CheckLog { up: true, .. }) => "ONLINE",
            Some(CheckLog { up: false, .. }) => "OFFLINE",
            None => "N/A",
        }
    }

    pub fn last_checked_text(&self) -> String {
        self.last_check
            .map(|c| discord_timestamp(c.ts))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[instrument(level = "debug", skip(pool))]
pub async fn compute_summary(pool: &DbPool, now_ms: i64) -> Result<UptimeSummary, sqlx::Error> {
    let since = |hours: i64| now_ms - hours * HOUR_MS;
    Ok(UptimeSummary {
        day: database::logs::uptime_percent_since(pool, since(DAY_HOURS)).await?,
        week: database::logs::uptime_percent_since(pool, since(WEEK_HOURS)).await?,
        month: database::logs::uptime_percent_since(pool, since(MONTH_HOURS)).await?,
        last_incident: database::downtimes::last_downtime(pool).await?,
        last_check: database::logs::latest_log(pool).await?,
    })
}

/// `start → end`, `start (ongoing)` or `No incidents`.
pub fn format_incident(incident: Option<Downtime>) -> String {
    match incident {
        None => "No incidents".to_string(),
        Some(Downtime {
            start_ts,
            end_ts: Some(end),
        }) => format!("{} → {}", discord_timestamp(start_ts), discord_timestamp(end)),
        Some(Downtime {
            start_ts,
            end_ts: None,
        }) => format!("{} (ongoing)", discord_timestamp(start_ts)),
    }
}

/// One chart point: bucket end label ("%H:%M", UTC) and its uptime percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyBucket {
    pub label: String,
    pub percent: f64,
}

/// The last 24 hours in one-hour buckets, oldest first. Bucket `i` (counting
/// back from `now`) covers `[now-(i+1)h, now-ih)`; empty buckets count as 100%.
#[instrument(level = "debug", skip(pool))]
pub async fn hourly_buckets(
    pool: &DbPool,
    now: DateTime<Utc>,
) -> Result<Vec<HourlyBucket>, sqlx::Error> {
    let mut buckets = Vec::with_capacity(CHART_BUCKETS as usize);
    for i in (0..CHART_BUCKETS).rev() {
        let bucket_end = now - Duration::hours(i);
        let end_ms = bucket_end.timestamp_millis();
        let percent = database::logs::uptime_between(pool, end_ms - HOUR_MS, end_ms).await?;
        buckets.push(HourlyBucket {
            label: bucket_end.format("%H:%M").to_string(),
            percent,
        });
    }
    Ok(buckets)
}

/// Plain-text summary used as the `/health` embed description and the owner DM.
pub fn health_text(name: &str, summary: &UptimeSummary) -> String {
    format!(
        "{name} health summary\n24h: {}% • 7d: {}% • 30d: {}%\n{}",
        summary.day,
        summary.week,
        summary.month,
        summary.incident_text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incident_formats() {
        assert_eq!(format_incident(None), "No incidents");
        assert_eq!(
            format_incident(Some(Downtime {
                start_ts: 1_000,
                end_ts: None
            })),
            "<t:1:f> (ongoing)"
        );
        assert_eq!(
            format_incident(Some(Downtime {
                start_ts: 1_000,
                end_ts: Some(61_000)
            })),
            "<t:1:f> → <t:61:f>"
        );
    }

    #[test]
    fn health_text_layout() {
        let summary = UptimeSummary {
            day: 99.5,
            week: 100.0,
            month: 97.25,
            last_incident: None,
            last_check: None,
        };
        assert_eq!(
            health_text("Maxy", &summary),
            "Maxy health summary\n24h: 99.5% • 7d: 100% • 30d: 97.25%\nNo incidents"
        );
    }
}
