//! Shape of the `/settings` view and the registered command set.
use serde_json::Value;
use status_monitor_bot::commands::all_commands;
use status_monitor_bot::commands::settings::ui::{
    current_settings_text, settings_components, settings_modal,
};
use status_monitor_bot::database::models::{MonitorSettings, SettingField};

fn sample() -> MonitorSettings {
    MonitorSettings {
        channel_id: "".into(),
        interval_min: 5,
        timeout_s: 10,
        response_keyword: "Online".into(),
        auto_ping_url: None,
        auto_ping_interval_s: 300,
    }
}

#[test]
fn registers_health_status_settings() {
    let names: Vec<String> = all_commands()
        .iter()
        .map(|c| serde_json::to_value(c).unwrap()["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["health", "status", "settings"]);
}

#[test]
fn settings_buttons_fit_in_two_rows() {
    let rows: Vec<Value> = settings_components(77)
        .iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect();
    assert_eq!(rows.len(), 2);
    let labels: Vec<&str> = rows
        .iter()
        .flat_map(|r| r["components"].as_array().unwrap())
        .map(|b| b["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        [
            "Edit Channel ID",
            "Interval (min)",
            "Timeout (s)",
            "Keyword",
            "Auto Ping URL",
            "Auto Ping Interval (s)",
            "Show current"
        ]
    );
    assert_eq!(
        rows[1]["components"][1]["custom_id"],
        "settings_show_77"
    );
}

#[test]
fn modal_carries_field_and_inviter() {
    let modal = serde_json::to_value(settings_modal(SettingField::TimeoutS, 5)).unwrap();
    assert_eq!(modal["custom_id"], "settings_modal_timeout_s_5");
    assert_eq!(modal["title"], "Edit Timeout (seconds)");
}

#[test]
fn current_settings_listing() {
    assert_eq!(
        current_settings_text(&sample()),
        "Current settings:\nchannel_id: \ninterval_min: 5\ntimeout_s: 10\nresponse_keyword: Online\nauto_ping_url: None\nauto_ping_interval_s: 300"
    );
}
