//! Shared state stored in Serenity's global `TypeMap`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serenity::prelude::TypeMapKey;

use crate::config::BotConfig;
use crate::database::DbPool;

/// The central, shared state of the application.
/// An `Arc<AppState>` lives in the client's data map so every command and
/// interaction handler can reach the database and config.
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<BotConfig>,
    /// Shared outbound client (status page, QuickChart, keep-alive pings).
    pub http_client: reqwest::Client,
    workers_started: AtomicBool,
}

impl AppState {
    pub fn new(db: DbPool, config: Arc<BotConfig>, http_client: reqwest::Client) -> Self {
        Self {
            db,
            config,
            http_client,
            workers_started: AtomicBool::new(false),
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    /// True exactly once per process; `ready` fires again after every gateway reconnect.
    pub fn claim_worker_start(&self) -> bool {
        !self.workers_started.swap(true, Ordering::SeqCst)
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
