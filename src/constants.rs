// Central constants: env fallbacks, timing and limits.
pub const DEFAULT_ONLINE_KEYWORD: &str = "Online";
pub const DEFAULT_CHECK_INTERVAL_MINUTES: i64 = 5;
pub const DEFAULT_TIMEOUT_SECONDS: i64 = 10;
pub const DEFAULT_AUTO_PING_INTERVAL_SECS: i64 = 300;
pub const DEFAULT_QUICKCHART_URL: &str = "https://quickchart.io/chart";
pub const DEFAULT_DB_PATH: &str = "monitor.db";
pub const DEFAULT_PORT: u16 = 3000; // hosting platforms usually inject PORT
pub const DEFAULT_MONITOR_NAME: &str = "Maxy";
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

// Floors applied to live-editable intervals so a bad setting cannot hammer anything.
pub const MIN_CHECK_INTERVAL_MINUTES: i64 = 1;
pub const MIN_AUTO_PING_INTERVAL_SECS: i64 = 10;

// Upper bounds accepted from the settings modal.
pub const MAX_CHECK_INTERVAL_MINUTES: i64 = 1440;
pub const MAX_TIMEOUT_SECONDS: i64 = 300;
pub const MAX_AUTO_PING_INTERVAL_SECS: i64 = 86_400;

/// Lifetime of the buttons attached to a `/settings` reply.
pub const SETTINGS_VIEW_TIMEOUT_SECS: i64 = 300;

pub const HOUR_MS: i64 = 3_600_000;
pub const DAY_HOURS: i64 = 24;
pub const WEEK_HOURS: i64 = 24 * 7;
pub const MONTH_HOURS: i64 = 24 * 30;
pub const CHART_BUCKETS: i64 = 24;

pub const CHART_FILENAME: &str = "health.png";
pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 300;
