//! Process configuration, read once at startup from the environment (and `.env`).
//!
//! Everything the bot persists in SQLite can be edited live through `/settings`;
//! the values here are the fallbacks used when a stored setting is blank or zero.

use serenity::model::id::{GuildId, UserId};
use thiserror::Error;

use crate::constants::{
    DEFAULT_CHECK_INTERVAL_MINUTES, DEFAULT_COMMAND_PREFIX, DEFAULT_DB_PATH, DEFAULT_MONITOR_NAME,
    DEFAULT_ONLINE_KEYWORD, DEFAULT_PORT, DEFAULT_QUICKCHART_URL, DEFAULT_TIMEOUT_SECONDS,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Fallbacks for the persisted monitor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDefaults {
    pub interval_min: i64,
    pub timeout_s: i64,
    pub response_keyword: String,
}

impl Default for SettingsDefaults {
    fn default() -> Self {
        Self {
            interval_min: DEFAULT_CHECK_INTERVAL_MINUTES,
            timeout_s: DEFAULT_TIMEOUT_SECONDS,
            response_keyword: DEFAULT_ONLINE_KEYWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub owner_ids: Vec<u64>,
    pub status_page_url: String,
    pub defaults: SettingsDefaults,
    pub quickchart_url: String,
    pub guild_id: Option<u64>,
    pub db_path: String,
    pub port: u16,
    /// Display name of the watched service in notifications and embeds.
    pub monitor_name: String,
    pub command_prefix: String,
}

impl BotConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = get("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;
        let owners_raw = get("OWNER_USER_IDS").ok_or(ConfigError::Missing("OWNER_USER_IDS"))?;
        let status_page_url =
            get("STATUS_PAGE_URL").ok_or(ConfigError::Missing("STATUS_PAGE_URL"))?;

        let owner_ids = parse_owner_ids(&owners_raw)?;
        if owner_ids.is_empty() {
            return Err(ConfigError::Missing("OWNER_USER_IDS"));
        }

        let defaults = SettingsDefaults {
            interval_min: parse_or(
                "CHECK_INTERVAL_MINUTES",
                get("CHECK_INTERVAL_MINUTES"),
                DEFAULT_CHECK_INTERVAL_MINUTES,
            )?,
            timeout_s: parse_or(
                "TIMEOUT_SECONDS",
                get("TIMEOUT_SECONDS"),
                DEFAULT_TIMEOUT_SECONDS,
            )?,
            response_keyword: get("ONLINE_KEYWORD")
                .unwrap_or_else(|| DEFAULT_ONLINE_KEYWORD.to_string()),
        };

        let guild_id = match get("GUILD_ID") {
            Some(raw) => Some(parse_id("GUILD_ID", &raw)?),
            None => None,
        };

        Ok(Self {
            bot_token,
            owner_ids,
            status_page_url,
            defaults,
            quickchart_url: get("QUICKCHART_URL")
                .unwrap_or_else(|| DEFAULT_QUICKCHART_URL.to_string()),
            guild_id,
            db_path: get("DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            monitor_name: get("MONITOR_NAME").unwrap_or_else(|| DEFAULT_MONITOR_NAME.to_string()),
            command_prefix: get("COMMAND_PREFIX")
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
        })
    }

    pub fn owner_user_ids(&self) -> Vec<UserId> {
        self.owner_ids.iter().copied().map(UserId::new).collect()
    }

    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_ids.contains(&user_id.get())
    }

    pub fn guild(&self) -> Option<GuildId> {
        self.guild_id.map(GuildId::new)
    }
}

/// Comma separated; blank entries are skipped.
pub fn parse_owner_ids(raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_id("OWNER_USER_IDS", s))
        .collect()
}

// Discord snowflakes are never zero; serenity panics on `UserId::new(0)`.
fn parse_id(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}
