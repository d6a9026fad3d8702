//! QuickChart rendering of the hourly uptime series.

use serde_json::{Value, json};
use tracing::debug;

use crate::constants::{CHART_HEIGHT, CHART_WIDTH};
use crate::error::{BotError, BotResult};
use crate::stats::HourlyBucket;

pub fn quickchart_config(labels: &[String], values: &[f64]) -> Value {
    json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Uptime %",
                "data": values,
                "fill": true,
                "borderColor": "#39d353",
                "backgroundColor": "rgba(57,211,83,0.08)"
            }]
        },
        "options": {
            "scales": { "y": { "min": 0, "max": 100 } },
            "plugins": { "legend": { "display": false } }
        }
    })
}

/// `base?c=<compact json>&format=png&width=800&height=300`, query-encoded.
pub fn quickchart_url(base: &str, config: &Value) -> BotResult<reqwest::Url> {
    let chart = config.to_string();
    let width = CHART_WIDTH.to_string();
    let height = CHART_HEIGHT.to_string();
    reqwest::Url::parse_with_params(
        base,
        [
            ("c", chart.as_str()),
            ("format", "png"),
            ("width", width.as_str()),
            ("height", height.as_str()),
        ],
    )
    .map_err(|e| BotError::InvalidSetting(format!("QUICKCHART_URL: {e}")))
}

pub async fn fetch_chart_png(
    client: &reqwest::Client,
    base: &str,
    buckets: &[HourlyBucket],
) -> BotResult<Vec<u8>> {
    let labels: Vec<String> = buckets.iter().map(|b| b.label.clone()).collect();
    let values: Vec<f64> = buckets.iter().map(|b| b.percent).collect();
    let url = quickchart_url(base, &quickchart_config(&labels, &values))?;
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(BotError::Chart {
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().await?;
    debug!(target = "chart", size = bytes.len(), "chart rendered");
    Ok(bytes.to_vec())
}
