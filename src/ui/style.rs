//! Central UI style constants and helpers.
pub const COLOR_ONLINE: u32 = 0x2ECC71; // Green
pub const COLOR_OFFLINE: u32 = 0xE74C3C; // Red
pub const COLOR_SETTINGS: u32 = 0x3498DB; // Blue

/// Embed colour for a "Current" label from the status summary.
pub fn status_color(current: &str) -> u32 {
    if current == "ONLINE" {
        COLOR_ONLINE
    } else {
        COLOR_OFFLINE
    }
}

