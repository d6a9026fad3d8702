//! Centralized custom_id strings for the settings controls.
//! Layout: `<prefix><column>_<inviter id>`; columns contain underscores, so
//! parsing splits the inviter off from the right.

use crate::database::models::SettingField;

/// Family segment the handler routes on (`custom_id` text before the first `_`).
pub const SETTINGS_FAMILY: &str = "settings";

pub const SETTINGS_EDIT_PREFIX: &str = "settings_edit_"; // followed by column + _ + inviter id
pub const SETTINGS_SHOW_PREFIX: &str = "settings_show_"; // followed by inviter id
pub const SETTINGS_MODAL_PREFIX: &str = "settings_modal_"; // followed by column + _ + inviter id
pub const SETTINGS_INPUT_ID: &str = "settings_value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Edit { field: SettingField, inviter: u64 },
    Show { inviter: u64 },
}

impl SettingsAction {
    pub fn inviter(&self) -> u64 {
        match self {
            Self::Edit { inviter, .. } | Self::Show { inviter } => *inviter,
        }
    }
}

pub fn family(custom_id: &str) -> &str {
    custom_id.split('_').next().unwrap_or("")
}

pub fn edit_id(field: SettingField, inviter: u64) -> String {
    format!("{SETTINGS_EDIT_PREFIX}{}_{inviter}", field.column())
}

pub fn show_id(inviter: u64) -> String {
    format!("{SETTINGS_SHOW_PREFIX}{inviter}")
}

pub fn modal_id(field: SettingField, inviter: u64) -> String {
    format!("{SETTINGS_MODAL_PREFIX}{}_{inviter}", field.column())
}

fn parse_field_and_inviter(rest: &str) -> Option<(SettingField, u64)> {
    let (column, inviter) = rest.rsplit_once('_')?;
    let field = SettingField::from_column(column)?;
    let inviter = inviter.parse::<u64>().ok()?;
    Some((field, inviter))
}

/// Parse a button custom_id from the settings view.
pub fn parse_settings_component(id: &str) -> Option<SettingsAction> {
    if let Some(rest) = id.strip_prefix(SETTINGS_EDIT_PREFIX) {
        let (field, inviter) = parse_field_and_inviter(rest)?;
        return Some(SettingsAction::Edit { field, inviter });
    }
    let inviter = id.strip_prefix(SETTINGS_SHOW_PREFIX)?.parse::<u64>().ok()?;
    Some(SettingsAction::Show { inviter })
}

/// Parse a settings modal custom_id into (field, inviter).
pub fn parse_settings_modal(id: &str) -> Option<(SettingField, u64)> {
    parse_field_and_inviter(id.strip_prefix(SETTINGS_MODAL_PREFIX)?)
}
