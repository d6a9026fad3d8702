//! Buttons and modals of the `/settings` view.

use std::sync::Arc;

use chrono::Utc;
use serenity::builder::CreateInteractionResponse;
use serenity::model::application::{ActionRowComponent, ComponentInteraction, ModalInteraction};
use serenity::model::id::UserId;
use serenity::prelude::Context;
use tracing::{error, info, instrument};

use super::ids::{SETTINGS_INPUT_ID, SettingsAction, parse_settings_component, parse_settings_modal};
use super::util::{ephemeral_text, respond_component, respond_modal};
use crate::AppState;
use crate::commands::settings::ui::{current_settings_text, settings_modal};
use crate::constants::SETTINGS_VIEW_TIMEOUT_SECS;
use crate::database::models::{SettingField, SettingValue};
use crate::database;

/// Controls stop working once the `/settings` reply is older than the view timeout.
pub fn is_expired(created_at_secs: i64, now_secs: i64) -> bool {
    now_secs - created_at_secs > SETTINGS_VIEW_TIMEOUT_SECS
}

/// The invoker of `/settings` and every owner may use its controls.
pub fn may_interact(state: &AppState, user: UserId, inviter: u64) -> bool {
    user.get() == inviter || state.config.is_owner(user)
}

#[instrument(level = "debug", skip(ctx, c, app_state), fields(cid = %c.data.custom_id))]
pub async fn handle(ctx: &Context, c: &ComponentInteraction, app_state: Arc<AppState>) {
    let Some(action) = parse_settings_component(&c.data.custom_id) else {
        return;
    };
    if !may_interact(&app_state, c.user.id, action.inviter()) {
        respond_component(ctx, c, "settings.denied", ephemeral_text("You cannot use these controls.")).await;
        return;
    }
    if is_expired(c.message.timestamp.unix_timestamp(), Utc::now().timestamp()) {
        respond_component(
            ctx,
            c,
            "settings.expired",
            ephemeral_text("These controls have expired. Run /settings again."),
        )
        .await;
        return;
    }
    match action {
        SettingsAction::Edit { field, inviter } => {
            respond_component(
                ctx,
                c,
                "settings.modal",
                CreateInteractionResponse::Modal(settings_modal(field, inviter)),
            )
            .await;
        }
        SettingsAction::Show { .. } => {
            let reply = match database::settings::get_settings(&app_state.db, &app_state.config.defaults).await {
                Ok(settings) => current_settings_text(&settings),
                Err(e) => {
                    error!(target = "settings", error = %e, "failed to load settings");
                    "Failed to load settings.".to_string()
                }
            };
            respond_component(ctx, c, "settings.show", ephemeral_text(reply)).await;
        }
    }
}

fn submitted_value(m: &ModalInteraction) -> String {
    m.data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == SETTINGS_INPUT_ID => {
                input.value.clone()
            }
            _ => None,
        })
        .unwrap_or_default()
}

/// Reply text for a rejected value.
pub fn rejection_text(field: SettingField) -> &'static str {
    if field.is_numeric() {
        "Invalid number"
    } else {
        "Invalid channel id"
    }
}

#[instrument(level = "debug", skip(ctx, m, app_state), fields(cid = %m.data.custom_id))]
pub async fn handle_modal(ctx: &Context, m: &ModalInteraction, app_state: Arc<AppState>) {
    let Some((field, inviter)) = parse_settings_modal(&m.data.custom_id) else {
        return;
    };
    if !may_interact(&app_state, m.user.id, inviter) {
        respond_modal(ctx, m, "settings.denied", ephemeral_text("You cannot use these controls.")).await;
        return;
    }
    let raw = submitted_value(m);
    let value = match SettingValue::parse(field, &raw) {
        Ok(v) => v,
        Err(_) => {
            respond_modal(ctx, m, "settings.invalid", ephemeral_text(rejection_text(field))).await;
            return;
        }
    };
    let reply = match database::settings::update_setting(&app_state.db, field, value.clone()).await {
        Ok(()) => {
            info!(target = "settings", field = field.column(), user = m.user.id.get(), "setting saved");
            format!("Saved {} = {}", field.column(), value)
        }
        Err(e) => {
            error!(target = "settings", field = field.column(), error = %e, "failed to save setting");
            "Failed to save setting.".to_string()
        }
    };
    respond_modal(ctx, m, "settings.saved", ephemeral_text(reply)).await;
}
