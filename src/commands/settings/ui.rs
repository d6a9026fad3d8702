use serenity::builder::{
    CreateActionRow, CreateButton, CreateEmbed, CreateInputText, CreateModal,
};
use serenity::model::application::InputTextStyle;

use crate::database::models::{MonitorSettings, SettingField};
use crate::interactions::ids::{SETTINGS_INPUT_ID, edit_id, modal_id, show_id};
use crate::ui::buttons::{Btn, button_rows};
use crate::ui::style::COLOR_SETTINGS;

pub fn settings_embed(settings: &MonitorSettings) -> CreateEmbed {
    settings.entries().into_iter().fold(
        CreateEmbed::new()
            .title("Monitor Settings")
            .description("Edit settings using the buttons below.")
            .color(COLOR_SETTINGS),
        |embed, (name, value)| embed.field(name, value, false),
    )
}

/// One edit button per field (channel id highlighted) followed by "Show current".
pub fn settings_components(inviter: u64) -> Vec<CreateActionRow> {
    let mut buttons: Vec<CreateButton> = SettingField::ALL
        .into_iter()
        .map(|field| {
            let id = edit_id(field, inviter);
            if field == SettingField::ChannelId {
                Btn::primary(&id, field.button_label())
            } else {
                Btn::secondary(&id, field.button_label())
            }
        })
        .collect();
    buttons.push(Btn::success(&show_id(inviter), "Show current"));
    button_rows(buttons)
}

pub fn settings_modal(field: SettingField, inviter: u64) -> CreateModal {
    let input = CreateInputText::new(InputTextStyle::Short, field.label(), SETTINGS_INPUT_ID)
        .placeholder(field.placeholder())
        .required(false);
    CreateModal::new(modal_id(field, inviter), format!("Edit {}", field.label()))
        .components(vec![CreateActionRow::InputText(input)])
}

/// "Current settings:" followed by one `key: value` line per setting.
pub fn current_settings_text(settings: &MonitorSettings) -> String {
    let lines: Vec<String> = settings
        .entries()
        .into_iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect();
    format!("Current settings:\n{}", lines.join("\n"))
}
