//! This module acts as a central router for component and modal interactions.
//!
//! The main `handler.rs` file delegates here by the custom_id "family"
//! (the text before the first underscore).

pub mod ids;
pub mod settings_handler;
pub mod util;
