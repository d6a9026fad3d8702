use std::sync::Arc;

use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::{Command as ApplicationCommand, Interaction};
use serenity::model::{channel::Message, gateway::Ready};
use serenity::prelude::EventHandler;
use tracing::{error, info, warn};

use crate::interactions::ids::{SETTINGS_FAMILY, family};
use crate::monitor::{Monitor, autoping};
use crate::notify::DiscordNotifier;
use crate::{AppState, commands, interactions};

/// Text commands accepted after the configured prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Health,
    Status,
    Unknown,
}

impl Command {
    pub fn from_word(word: &str) -> Self {
        match word {
            "health" => Command::Health,
            "status" => Command::Status,
            _ => Command::Unknown,
        }
    }
}

/// Splits `!status extra` into the command word. The word must follow the
/// prefix directly, so `! status` and a bare `!` yield `None`.
pub fn parse_prefix_command(content: &str, prefix: &str) -> Option<Command> {
    let body = content.strip_prefix(prefix)?;
    let word = body.split(char::is_whitespace).next()?;
    (!word.is_empty()).then(|| Command::from_word(word))
}

pub struct Handler;

impl Handler {
    fn start_workers(ctx: &Context, app_state: &Arc<AppState>) {
        if !app_state.claim_worker_start() {
            return;
        }
        let config = &app_state.config;
        let notifier = Arc::new(DiscordNotifier::new(ctx.http.clone(), config.owner_user_ids()));
        let monitor = Arc::new(Monitor::new(
            app_state.db.clone(),
            app_state.http_client.clone(),
            config.status_page_url.clone(),
            config.monitor_name.clone(),
            config.defaults.clone(),
            notifier,
        ));
        tokio::spawn(monitor.run_loop());
        tokio::spawn(autoping::run_auto_ping_loop(
            app_state.db.clone(),
            app_state.http_client.clone(),
            config.defaults.clone(),
        ));
        info!(target = "handler", "monitor and keep-alive workers started");
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            warn!(target = "handler", "missing_app_state");
            return;
        };
        match &interaction {
            Interaction::Command(command) => match command.data.name.as_str() {
                "health" => commands::health::run_slash(&ctx, command).await,
                "status" => commands::status::run_slash(&ctx, command).await,
                "settings" => commands::settings::run::run_slash(&ctx, command).await,
                _ => {}
            },
            Interaction::Component(component) => {
                if family(&component.data.custom_id) == SETTINGS_FAMILY {
                    interactions::settings_handler::handle(&ctx, component, app_state).await
                }
            }
            Interaction::Modal(modal) => {
                if family(&modal.data.custom_id) == SETTINGS_FAMILY {
                    interactions::settings_handler::handle_modal(&ctx, modal, app_state).await
                }
            }
            _ => {}
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        match parse_prefix_command(&msg.content, &app_state.config.command_prefix) {
            Some(Command::Health) => commands::health::run_prefix(&ctx, &msg).await,
            Some(Command::Status) => commands::status::run_prefix(&ctx, &msg).await,
            Some(Command::Unknown) | None => {}
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(target = "handler", user = %ready.user.name, "bot ready");
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            error!(target = "handler", "missing_app_state on ready");
            return;
        };
        match app_state.config.guild() {
            Some(guild_id) => match guild_id.set_commands(&ctx.http, commands::all_commands()).await {
                Ok(_) => info!(target = "handler", guild = guild_id.get(), "synced guild commands"),
                Err(e) => error!(target = "handler", error = ?e, "slash sync failed"),
            },
            None => match ApplicationCommand::set_global_commands(&ctx.http, commands::all_commands()).await {
                Ok(_) => info!(target = "handler", "synced global commands"),
                Err(e) => error!(target = "handler", error = ?e, "slash sync failed"),
            },
        }
        Self::start_workers(&ctx, &app_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_commands_parse() {
        assert_eq!(parse_prefix_command("!status", "!"), Some(Command::Status));
        assert_eq!(parse_prefix_command("!health now", "!"), Some(Command::Health));
        assert_eq!(parse_prefix_command("!ping", "!"), Some(Command::Unknown));
        assert_eq!(parse_prefix_command("status", "!"), None);
        assert_eq!(parse_prefix_command("!", "!"), None);
        assert_eq!(parse_prefix_command("! status", "!"), None);
        assert_eq!(parse_prefix_command("!status\tnow", "!"), Some(Command::Status));
    }
}
