//! Keep-alive pinger. Free hosting tiers put idle services to sleep; hitting a
//! configured URL on a fixed cadence keeps them (or this process) awake.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::SettingsDefaults;
use crate::constants::{MAX_AUTO_PING_INTERVAL_SECS, MIN_AUTO_PING_INTERVAL_SECS};
use crate::database::{self, DbPool};

/// Seconds to wait between pings for a configured interval.
pub fn effective_interval(configured_secs: i64) -> Duration {
    Duration::from_secs(
        configured_secs.clamp(MIN_AUTO_PING_INTERVAL_SECS, MAX_AUTO_PING_INTERVAL_SECS) as u64,
    )
}

/// Sends one ping; returns the HTTP status on success.
pub async fn ping_once(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<u16, reqwest::Error> {
    let response = client.get(url).timeout(timeout).send().await?;
    Ok(response.status().as_u16())
}

/// One keep-alive round: re-reads the settings, pings when a URL is set and
/// returns how long to wait before the next round.
pub async fn ping_round(
    db: &DbPool,
    client: &reqwest::Client,
    defaults: &SettingsDefaults,
) -> Duration {
    let settings = match database::settings::get_settings(db, defaults).await {
        Ok(s) => s,
        Err(e) => {
            warn!(target = "autoping", error = %e, "failed to read settings");
            return effective_interval(0);
        }
    };
    if let Some(url) = settings.auto_ping_url.as_deref() {
        let timeout = Duration::from_secs(settings.timeout_s.max(1) as u64);
        match ping_once(client, url, timeout).await {
            Ok(status) => debug!(target = "autoping", %url, status, "keep-alive ping"),
            Err(e) => warn!(target = "autoping", %url, error = %e, "keep-alive ping failed"),
        }
    }
    effective_interval(settings.auto_ping_interval_s)
}

pub async fn run_auto_ping_loop(db: DbPool, client: reqwest::Client, defaults: SettingsDefaults) {
    loop {
        let wait = ping_round(&db, &client, &defaults).await;
        tokio::time::sleep(wait).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_has_a_floor() {
        assert_eq!(effective_interval(0), Duration::from_secs(10));
        assert_eq!(effective_interval(-5), Duration::from_secs(10));
        assert_eq!(effective_interval(300), Duration::from_secs(300));
        assert_eq!(effective_interval(i64::MAX), Duration::from_secs(86_400));
    }
}
