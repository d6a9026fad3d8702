use tracing::instrument;

use super::DbPool;
use super::models::Downtime;

#[instrument(level = "debug", skip(pool))]
pub async fn start_downtime(pool: &DbPool, start_ts: i64) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO downtimes (start_ts, end_ts) VALUES (?, NULL)")
        .bind(start_ts)
        .execute(pool)
        .await?;
    Ok(())
}

/// Closes the most recent incident.
#[instrument(level = "debug", skip(pool))]
pub async fn end_last_downtime(pool: &DbPool, end_ts: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE downtimes SET end_ts = ?
         WHERE id = (SELECT id FROM downtimes ORDER BY id DESC LIMIT 1)",
    )
    .bind(end_ts)
    .execute(pool)
    .await?;
    Ok(())
}

#[instrument(level = "debug", skip(pool))]
pub async fn last_downtime(pool: &DbPool) -> Result<Option<Downtime>, sqlx::Error> {
    sqlx::query_as::<_, Downtime>(
        "SELECT start_ts, end_ts FROM downtimes ORDER BY id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}
