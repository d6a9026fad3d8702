//! `/settings`: owner-only buttons + modals over the persisted monitor settings.
//! Button and modal submissions are handled in `interactions::settings_handler`.
pub mod run;
pub mod ui;
