use serenity::builder::{CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::CommandInteraction;
use serenity::prelude::*;
use tracing::{error, warn};

use super::ui::{settings_components, settings_embed};
use crate::database;
use crate::interactions::util::ephemeral_text;
use crate::model::AppState;

pub fn register() -> CreateCommand {
    CreateCommand::new("settings").description("Open interactive settings UI (owners only).")
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        warn!(command = "settings", "missing_app_state");
        return;
    };
    let response = if !app_state.config.is_owner(interaction.user.id) {
        ephemeral_text("You are not allowed to use this command.")
    } else {
        match database::settings::get_settings(&app_state.db, &app_state.config.defaults).await {
            Ok(settings) => CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(settings_embed(&settings))
                    .components(settings_components(interaction.user.id.get()))
                    .ephemeral(true),
            ),
            Err(e) => {
                error!(command = "settings", error = %e, "failed to load settings");
                ephemeral_text("Failed to load settings.")
            }
        }
    };
    if let Err(e) = interaction.create_response(&ctx.http, response).await {
        error!(command = "settings", error = ?e, "create_response failed");
    }
}
