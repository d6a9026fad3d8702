//! Misc small utilities shared across modules.
use chrono::{DateTime, SecondsFormat, Utc};

/// Current wall-clock time in epoch milliseconds, the unit stored in `logs.ts`.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn datetime_from_ms(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
}

/// Discord timestamp markup; every client renders it in the viewer's own timezone.
pub fn discord_timestamp(ms: i64) -> String {
    format!("<t:{}:f>", ms.div_euclid(1000))
}

/// ISO-8601 UTC with a trailing `Z`, as served by the web endpoint.
pub fn iso_utc(ms: i64) -> Option<String> {
    datetime_from_ms(ms).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
