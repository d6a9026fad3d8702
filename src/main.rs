use std::sync::Arc;
use std::time::Duration;

use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use status_monitor_bot::config::BotConfig;
use status_monitor_bot::web::{self, WebState};
use status_monitor_bot::{AppState, database, handler};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match BotConfig::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!(error = %e, "configuration error");
            eprintln!("ERROR: please set BOT_TOKEN, OWNER_USER_IDS, STATUS_PAGE_URL");
            std::process::exit(1);
        }
    };
    info!(
        owners = config.owner_ids.len(),
        url = %config.status_page_url,
        db = %config.db_path,
        "configuration loaded"
    );

    let db = database::connect(&config.db_path).await?;
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let web_state = WebState {
        db: db.clone(),
        defaults: config.defaults.clone(),
    };
    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = web::serve(web_state, port).await {
            error!(target = "web", error = %e, "web service stopped");
        }
    });

    let app_state = Arc::new(AppState::new(db, config.clone(), http_client));

    // MESSAGE_CONTENT is needed for the `!health` / `!status` fallbacks.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.bot_token, intents)
        .event_handler(handler::Handler)
        .await?;

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(app_state);
    }

    client.start().await?;
    Ok(())
}
