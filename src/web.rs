//! Minimal web service so the hosting platform sees a bound port, plus a JSON status view.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{error, info};

use crate::config::SettingsDefaults;
use crate::database::models::MonitorSettings;
use crate::database::{self, DbPool};
use crate::util::iso_utc;

#[derive(Clone)]
pub struct WebState {
    pub db: DbPool,
    pub defaults: SettingsDefaults,
}

#[derive(Debug, Serialize)]
pub struct StatusPayload {
    pub status: &'static str,
    pub last_checked: Option<String>,
    pub settings: MonitorSettings,
}

pub fn build_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/_health", get(health))
        .with_state(state)
}

async fn index(State(state): State<WebState>) -> Response {
    match status_payload(&state).await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => {
            error!(target = "web", error = %e, "status query failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "database error").into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn status_payload(state: &WebState) -> Result<StatusPayload, sqlx::Error> {
    let settings = database::settings::get_settings(&state.db, &state.defaults).await?;
    let last = database::logs::latest_log(&state.db).await?;
    let status = match last {
        Some(log) if log.up => "online",
        Some(_) => "offline",
        None => "unknown",
    };
    Ok(StatusPayload {
        status,
        last_checked: last.and_then(|log| iso_utc(log.ts)),
        settings,
    })
}

/// Binds `0.0.0.0:port` and serves until the process exits.
pub async fn serve(state: WebState, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(target = "web", port, "web service listening");
    axum::serve(listener, build_router(state)).await
}
