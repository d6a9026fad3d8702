use std::time::Duration;

use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The keyword was found in the response body.
    Online,
    /// The page answered but the keyword was missing.
    Offline,
    /// Transport error, timeout or unreadable body.
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Case-insensitive keyword match; an empty keyword never matches.
pub fn body_contains_keyword(body: &str, keyword: &str) -> bool {
    let keyword = keyword.trim();
    !keyword.is_empty() && body.to_lowercase().contains(&keyword.to_lowercase())
}

/// Fetches `url` and decides online/offline from the body alone; the HTTP status is ignored.
pub async fn check_status_page(
    client: &reqwest::Client,
    url: &str,
    keyword: &str,
    timeout: Duration,
) -> ProbeOutcome {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!(target = "monitor.probe", %url, error = %e, "fetch failed");
            return ProbeOutcome::Unreachable(e.to_string());
        }
    };
    let status = response.status();
    match response.text().await {
        Ok(body) => {
            let online = body_contains_keyword(&body, keyword);
            debug!(target = "monitor.probe", %url, status = status.as_u16(), online, "probe done");
            if online {
                ProbeOutcome::Online
            } else {
                ProbeOutcome::Offline
            }
        }
        Err(e) => {
            warn!(target = "monitor.probe", %url, error = %e, "reading body failed");
            ProbeOutcome::Unreachable(e.to_string())
        }
    }
}
