use tracing::instrument;

use super::DbPool;
use super::models::{MonitorSettings, SettingField, SettingValue};
use crate::config::SettingsDefaults;
use crate::constants::DEFAULT_AUTO_PING_INTERVAL_SECS;

type SettingsRow = (
    Option<String>,
    Option<i64>,
    Option<i64>,
    Option<String>,
    Option<String>,
    Option<i64>,
);

/// Reads the settings row; NULL, empty and zero values fall back to `defaults`.
#[instrument(level = "debug", skip(pool, defaults))]
pub async fn get_settings(
    pool: &DbPool,
    defaults: &SettingsDefaults,
) -> Result<MonitorSettings, sqlx::Error> {
    let row: Option<SettingsRow> = sqlx::query_as(
        "SELECT channel_id, interval_min, timeout_s, response_keyword, auto_ping_url, auto_ping_interval_s
         FROM settings WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;
    let (channel_id, interval_min, timeout_s, keyword, auto_ping_url, auto_ping_interval_s) =
        row.unwrap_or_default();

    Ok(MonitorSettings {
        channel_id: channel_id.unwrap_or_default(),
        interval_min: non_zero(interval_min).unwrap_or(defaults.interval_min),
        timeout_s: non_zero(timeout_s).unwrap_or(defaults.timeout_s),
        response_keyword: non_blank(keyword).unwrap_or_else(|| defaults.response_keyword.clone()),
        auto_ping_url: non_blank(auto_ping_url),
        auto_ping_interval_s: non_zero(auto_ping_interval_s)
            .unwrap_or(DEFAULT_AUTO_PING_INTERVAL_SECS),
    })
}

#[instrument(level = "debug", skip(pool))]
pub async fn update_setting(
    pool: &DbPool,
    field: SettingField,
    value: SettingValue,
) -> Result<(), sqlx::Error> {
    // Column names come from the SettingField whitelist, never from user input.
    let sql = format!("UPDATE settings SET {} = ? WHERE id = 1", field.column());
    let query = sqlx::query(&sql);
    let query = match value {
        SettingValue::Integer(n) => query.bind(n),
        SettingValue::Text(text) => query.bind(text),
    };
    query.execute(pool).await?;
    Ok(())
}

fn non_zero(v: Option<i64>) -> Option<i64> {
    v.filter(|n| *n != 0)
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}
