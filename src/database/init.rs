//! Idempotent schema bootstrap, run on every startup.

use tracing::instrument;

use super::DbPool;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS settings (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        channel_id TEXT DEFAULT '',
        interval_min INTEGER DEFAULT 5,
        timeout_s INTEGER DEFAULT 10,
        response_keyword TEXT DEFAULT 'Online',
        auto_ping_url TEXT DEFAULT NULL,
        auto_ping_interval_s INTEGER DEFAULT 300
    )",
    "CREATE TABLE IF NOT EXISTS logs (ts INTEGER NOT NULL, up INTEGER NOT NULL)",
    "CREATE INDEX IF NOT EXISTS idx_logs_ts ON logs (ts)",
    "CREATE TABLE IF NOT EXISTS downtimes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_ts INTEGER NOT NULL,
        end_ts INTEGER
    )",
    // The settings table always holds exactly one row.
    "INSERT OR IGNORE INTO settings (id) VALUES (1)",
];

#[instrument(level = "debug", skip(pool))]
pub async fn init_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
