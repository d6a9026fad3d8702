//! This module acts as a central hub for all database-related logic.
//! Each submodule owns one table, e.g. `database::logs::insert_log`.

pub mod downtimes;
pub mod init;
pub mod logs;
pub mod models;
pub mod settings;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

/// The connection pool shared by the bot, the workers and the web service.
pub type DbPool = Pool<Sqlite>;

/// Opens (creating if needed) the SQLite file and makes sure the schema exists.
pub async fn connect(path: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    init::init_schema(&pool).await?;
    Ok(pool)
}

/// Private in-memory database. One connection only: every new
/// `sqlite::memory:` connection would otherwise see an empty database.
pub async fn connect_in_memory() -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    init::init_schema(&pool).await?;
    Ok(pool)
}
