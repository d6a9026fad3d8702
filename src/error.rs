//! Crate-wide error type. The database layer returns `sqlx::Error` directly and
//! callers fold it in here with `?`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("QuickChart error {status}")]
    Chart { status: u16 },

    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

pub type BotResult<T> = Result<T, BotError>;
