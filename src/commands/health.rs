//! `/health` and `!health`: uptime summary plus the 24h hourly chart.

use chrono::Utc;
use serenity::builder::{
    CreateAttachment, CreateCommand, CreateEmbed, CreateInteractionResponseFollowup, CreateMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::{error, warn};

use crate::constants::CHART_FILENAME;
use crate::error::BotResult;
use crate::model::AppState;
use crate::notify::{DiscordNotifier, Notification, OwnerNotifier};
use crate::{chart, stats};

pub struct HealthReport {
    pub text: String,
    pub chart_png: Vec<u8>,
}

pub fn register() -> CreateCommand {
    CreateCommand::new("health").description("Show service health (chart + text).")
}

pub async fn build_health_report(state: &AppState) -> BotResult<HealthReport> {
    let now = Utc::now();
    let summary = stats::compute_summary(&state.db, now.timestamp_millis()).await?;
    let buckets = stats::hourly_buckets(&state.db, now).await?;
    let chart_png =
        chart::fetch_chart_png(&state.http_client, &state.config.quickchart_url, &buckets).await?;
    Ok(HealthReport {
        text: stats::health_text(&state.config.monitor_name, &summary),
        chart_png,
    })
}

pub fn health_embed(name: &str, text: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("{name} Health"))
        .description(text)
        .image(format!("attachment://{CHART_FILENAME}"))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        warn!(command = "health", "missing_app_state");
        return;
    };
    let report = match build_health_report(&state).await {
        Ok(r) => r,
        Err(e) => {
            error!(command = "health", error = %e, "health summary failed");
            interaction
                .create_followup(
                    &ctx.http,
                    CreateInteractionResponseFollowup::new()
                        .content("Error generating health summary"),
                )
                .await
                .ok();
            return;
        }
    };
    let followup = CreateInteractionResponseFollowup::new()
        .embed(health_embed(&state.config.monitor_name, &report.text))
        .add_file(CreateAttachment::bytes(report.chart_png.clone(), CHART_FILENAME));
    if let Err(e) = interaction.create_followup(&ctx.http, followup).await {
        error!(command = "health", error = ?e, "followup failed");
    }

    // Owners get the same summary by DM.
    DiscordNotifier::new(ctx.http.clone(), state.config.owner_user_ids())
        .notify(Notification::text(report.text).with_attachment(report.chart_png, CHART_FILENAME))
        .await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    msg.channel_id
        .say(&ctx.http, "Generating health summary...")
        .await
        .ok();
    match build_health_report(&state).await {
        Ok(report) => {
            let message = CreateMessage::new()
                .embed(health_embed(&state.config.monitor_name, &report.text))
                .add_file(CreateAttachment::bytes(report.chart_png, CHART_FILENAME));
            if let Err(e) = msg.channel_id.send_message(&ctx.http, message).await {
                error!(command = "health", error = ?e, "prefix reply failed");
            }
        }
        Err(e) => {
            error!(command = "health", error = %e, "health summary failed");
            msg.channel_id
                .say(&ctx.http, "Error generating health summary")
                .await
                .ok();
        }
    }
}
