//! Central button construction helpers ensuring consistent style.
use serenity::builder::{CreateActionRow, CreateButton};
use serenity::model::application::ButtonStyle;

/// Discord rejects action rows holding more than five buttons.
pub const MAX_BUTTONS_PER_ROW: usize = 5;

pub struct Btn;
impl Btn {
    pub fn primary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(label)
            .style(ButtonStyle::Primary)
    }
    pub fn success(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(label)
            .style(ButtonStyle::Success)
    }
    pub fn secondary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(label)
            .style(ButtonStyle::Secondary)
    }
}

/// Packs buttons into as many rows as needed, preserving order.
pub fn button_rows(buttons: Vec<CreateButton>) -> Vec<CreateActionRow> {
    buttons
        .chunks(MAX_BUTTONS_PER_ROW)
        .map(|chunk| CreateActionRow::Buttons(chunk.to_vec()))
        .collect()
}
