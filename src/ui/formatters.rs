use crate::core::wifi_monitor::{display_metric, Snapshot, NUMERIC_PLACEHOLDER};
use crate::core::wifi_monitor::sink::TIMESTAMP_FORMAT;

/// Format the signal column: "-58 dBm (Very Good 80%)" or "N/A (Unknown)"
pub fn format_signal(snapshot: &Snapshot) -> String {
    match snapshot.rssi {
        Some(rssi) => format!("{} dBm ({})", rssi, snapshot.signal_tier),
        None => format!("{} ({})", NUMERIC_PLACEHOLDER, snapshot.signal_tier),
    }
}

/// Format a percentage or the placeholder
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", v),
        None => NUMERIC_PLACEHOLDER.to_string(),
    }
}

/// Format milliseconds or the placeholder
pub fn format_ms(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} ms", v),
        None => NUMERIC_PLACEHOLDER.to_string(),
    }
}

/// Single-line console summary of a snapshot
pub fn format_summary_line(snapshot: &Snapshot) -> String {
    format!(
        "[{}] SSID: {} | Signal: {} | Loss: {} | Latency: {} | Router Loss: {}",
        snapshot.timestamp.format(TIMESTAMP_FORMAT),
        snapshot.ssid_or_placeholder(),
        format_signal(snapshot),
        format_percent(snapshot.internet_loss_pct),
        format_ms(snapshot.latency_ms),
        format_percent(snapshot.router_loss_pct),
    )
}

/// Multi-line detail view used by `wifimon snapshot`
pub fn format_details(snapshot: &Snapshot) -> Vec<(&'static str, String)> {
    vec![
        ("Interface", snapshot.interface.clone()),
        ("SSID", snapshot.ssid_or_placeholder().to_string()),
        ("BSSID", snapshot.bssid_or_placeholder().to_string()),
        ("Channel", snapshot.channel_or_placeholder().to_string()),
        ("Signal", format_signal(snapshot)),
        ("Noise", format!("{} dBm", display_metric(snapshot.noise))),
        ("Tx Rate", format!("{} Mbps", display_metric(snapshot.tx_rate))),
        ("Internet Loss", format_percent(snapshot.internet_loss_pct)),
        ("Latency", format_ms(snapshot.latency_ms)),
        ("Router Loss", format_percent(snapshot.router_loss_pct)),
        ("DNS Time", format_ms(snapshot.dns_time_ms)),
    ]
}
