//! Row types and the typed view of the single `settings` row.

use serde::Serialize;

use crate::constants::{
    MAX_AUTO_PING_INTERVAL_SECS, MAX_CHECK_INTERVAL_MINUTES, MAX_TIMEOUT_SECONDS,
};
use crate::error::BotError;

/// Live monitor settings after fallbacks have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorSettings {
    pub channel_id: String,
    pub interval_min: i64,
    pub timeout_s: i64,
    pub response_keyword: String,
    pub auto_ping_url: Option<String>,
    pub auto_ping_interval_s: i64,
}

impl MonitorSettings {
    /// `(column, display value)` pairs in the order the settings UI lists them.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (SettingField::ChannelId.column(), self.channel_id.clone()),
            (SettingField::IntervalMin.column(), self.interval_min.to_string()),
            (SettingField::TimeoutS.column(), self.timeout_s.to_string()),
            (SettingField::ResponseKeyword.column(), self.response_keyword.clone()),
            (
                SettingField::AutoPingUrl.column(),
                self.auto_ping_url.clone().unwrap_or_else(|| "None".to_string()),
            ),
            (
                SettingField::AutoPingIntervalS.column(),
                self.auto_ping_interval_s.to_string(),
            ),
        ]
    }

    /// Parsed notification channel, if one is configured.
    pub fn channel(&self) -> Option<u64> {
        self.channel_id.trim().parse::<u64>().ok().filter(|id| *id != 0)
    }
}

/// Whitelist of editable columns; the only way a column name reaches SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    ChannelId,
    IntervalMin,
    TimeoutS,
    ResponseKeyword,
    AutoPingUrl,
    AutoPingIntervalS,
}

impl SettingField {
    pub const ALL: [SettingField; 6] = [
        SettingField::ChannelId,
        SettingField::IntervalMin,
        SettingField::TimeoutS,
        SettingField::ResponseKeyword,
        SettingField::AutoPingUrl,
        SettingField::AutoPingIntervalS,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Self::ChannelId => "channel_id",
            Self::IntervalMin => "interval_min",
            Self::TimeoutS => "timeout_s",
            Self::ResponseKeyword => "response_keyword",
            Self::AutoPingUrl => "auto_ping_url",
            Self::AutoPingIntervalS => "auto_ping_interval_s",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::IntervalMin | Self::TimeoutS | Self::AutoPingIntervalS
        )
    }

    /// Modal input label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ChannelId => "Channel ID",
            Self::IntervalMin => "Interval (minutes)",
            Self::TimeoutS => "Timeout (seconds)",
            Self::ResponseKeyword => "Online keyword",
            Self::AutoPingUrl => "Auto ping URL (blank to disable)",
            Self::AutoPingIntervalS => "Auto ping interval (seconds)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::ChannelId => "123456789012345678",
            Self::IntervalMin => "5",
            Self::TimeoutS => "10",
            Self::ResponseKeyword => "Online",
            Self::AutoPingUrl => "https://example.com/keepalive",
            Self::AutoPingIntervalS => "300",
        }
    }

    /// Largest value accepted for a numeric field.
    pub fn max_value(self) -> Option<i64> {
        match self {
            Self::IntervalMin => Some(MAX_CHECK_INTERVAL_MINUTES),
            Self::TimeoutS => Some(MAX_TIMEOUT_SECONDS),
            Self::AutoPingIntervalS => Some(MAX_AUTO_PING_INTERVAL_SECS),
            Self::ChannelId | Self::ResponseKeyword | Self::AutoPingUrl => None,
        }
    }

    /// Label of the button that opens this field's modal.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::ChannelId => "Edit Channel ID",
            Self::IntervalMin => "Interval (min)",
            Self::TimeoutS => "Timeout (s)",
            Self::ResponseKeyword => "Keyword",
            Self::AutoPingUrl => "Auto Ping URL",
            Self::AutoPingIntervalS => "Auto Ping Interval (s)",
        }
    }
}

/// A value ready to be written to one settings column. `Text(None)` stores NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Integer(i64),
    Text(Option<String>),
}

impl SettingValue {
    /// Validates raw modal input for `field`. Numeric fields need an integer
    /// in `1..=field.max_value()`; a blank text field clears the column.
    pub fn parse(field: SettingField, raw: &str) -> Result<Self, BotError> {
        let raw = raw.trim();
        if field.is_numeric() {
            let max = field.max_value().unwrap_or(i64::MAX);
            return match raw.parse::<i64>() {
                Ok(n) if (1..=max).contains(&n) => Ok(Self::Integer(n)),
                _ => Err(BotError::InvalidSetting(format!(
                    "{} must be a whole number between 1 and {max}",
                    field.column()
                ))),
            };
        }
        if field == SettingField::ChannelId
            && !raw.is_empty()
            && !raw.parse::<u64>().is_ok_and(|id| id != 0)
        {
            return Err(BotError::InvalidSetting(
                "channel_id must be a numeric channel id".to_string(),
            ));
        }
        Ok(Self::Text((!raw.is_empty()).then(|| raw.to_string())))
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(Some(s)) => f.write_str(s),
            Self::Text(None) => Ok(()),
        }
    }
}

/// One probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct CheckLog {
    pub ts: i64,
    pub up: bool,
}

/// A downtime incident; `end_ts` is `None` while the outage is ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct Downtime {
    pub start_ts: i64,
    pub end_ts: Option<i64>,
}

impl Downtime {
    pub fn is_open(&self) -> bool {
        self.end_ts.is_none()
    }
}
