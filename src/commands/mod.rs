// src/commands/mod.rs
// Slash command modules; each exposes `register()` and `run_slash()`.

pub mod health;
pub mod settings;
pub mod status;

use serenity::builder::CreateCommand;

/// Every application command this bot registers on `ready`.
pub fn all_commands() -> Vec<CreateCommand> {
    vec![
        health::register(),
        status::register(),
        settings::run::register(),
    ]
}
