use chrono::Utc;
use serenity::builder::{CreateCommand, CreateEmbed, CreateInteractionResponseFollowup, CreateMessage};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::{error, warn};

use crate::model::AppState;
use crate::stats::{self, UptimeSummary};
use crate::ui::style::status_color;

pub fn register() -> CreateCommand {
    CreateCommand::new("status")
        .description("Show quick status (uptime %, last incident).")
}

pub fn status_embed(name: &str, summary: &UptimeSummary) -> CreateEmbed {
    let current = summary.current_label();
    CreateEmbed::new()
        .title(format!("{name} Quick Status"))
        .color(status_color(current))
        .field("Current", current, true)
        .field("Last checked", summary.last_checked_text(), true)
        .field("24h", format!("{}%", summary.day), true)
        .field("7d", format!("{}%", summary.week), true)
        .field("30d", format!("{}%", summary.month), true)
        .field("Last incident", summary.incident_text(), false)
}

async fn build_status_embed(state: &AppState) -> Result<CreateEmbed, sqlx::Error> {
    let summary = stats::compute_summary(&state.db, Utc::now().timestamp_millis()).await?;
    Ok(status_embed(&state.config.monitor_name, &summary))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        warn!(command = "status", "missing_app_state");
        return;
    };
    let followup = match build_status_embed(&state).await {
        Ok(embed) => CreateInteractionResponseFollowup::new().embed(embed),
        Err(e) => {
            error!(command = "status", error = %e, "status query failed");
            CreateInteractionResponseFollowup::new().content("Error fetching status")
        }
    };
    if let Err(e) = interaction.create_followup(&ctx.http, followup).await {
        error!(command = "status", error = ?e, "followup failed");
    }
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let message = match build_status_embed(&state).await {
        Ok(embed) => CreateMessage::new().embed(embed),
        Err(e) => {
            error!(command = "status", error = %e, "status query failed");
            CreateMessage::new().content("Error fetching status")
        }
    };
    if let Err(e) = msg.channel_id.send_message(&ctx.http, message).await {
        error!(command = "status", error = ?e, "prefix reply failed");
    }
}
