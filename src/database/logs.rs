//! Per-check log rows and the uptime arithmetic over them.

use tracing::instrument;

use super::DbPool;
use super::models::CheckLog;

#[instrument(level = "trace", skip(pool))]
pub async fn insert_log(pool: &DbPool, ts_ms: i64, up: bool) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO logs (ts, up) VALUES (?, ?)")
        .bind(ts_ms)
        .bind(up)
        .execute(pool)
        .await?;
    Ok(())
}

#[instrument(level = "debug", skip(pool))]
pub async fn latest_log(pool: &DbPool) -> Result<Option<CheckLog>, sqlx::Error> {
    sqlx::query_as::<_, CheckLog>("SELECT ts, up FROM logs ORDER BY ts DESC LIMIT 1")
        .fetch_optional(pool)
        .await
}

/// Uptime over every check with `ts >= since_ms`.
#[instrument(level = "debug", skip(pool))]
pub async fn uptime_percent_since(pool: &DbPool, since_ms: i64) -> Result<f64, sqlx::Error> {
    let (total, up): (i64, Option<i64>) =
        sqlx::query_as("SELECT COUNT(*), SUM(up) FROM logs WHERE ts >= ?")
            .bind(since_ms)
            .fetch_one(pool)
            .await?;
    Ok(uptime_percent(total, up.unwrap_or(0)))
}

/// Uptime over the half-open window `[start_ms, end_ms)`.
#[instrument(level = "trace", skip(pool))]
pub async fn uptime_between(pool: &DbPool, start_ms: i64, end_ms: i64) -> Result<f64, sqlx::Error> {
    let (total, up): (i64, Option<i64>) =
        sqlx::query_as("SELECT COUNT(*), SUM(up) FROM logs WHERE ts >= ? AND ts < ?")
            .bind(start_ms)
            .bind(end_ms)
            .fetch_one(pool)
            .await?;
    Ok(uptime_percent(total, up.unwrap_or(0)))
}

/// Percentage rounded to two decimals. A window without checks counts as fully up.
pub fn uptime_percent(total: i64, up: i64) -> f64 {
    if total <= 0 {
        return 100.0;
    }
    let pct = up as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_is_fully_up() {
        assert_eq!(uptime_percent(0, 0), 100.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(uptime_percent(3, 2), 66.67);
        assert_eq!(uptime_percent(3, 1), 33.33);
        assert_eq!(uptime_percent(4, 4), 100.0);
        assert_eq!(uptime_percent(5, 0), 0.0);
    }
}
