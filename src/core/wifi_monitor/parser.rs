//! Line-oriented extraction over probe output.
//!
//! Probe tools print `Label: value` blocks with inconsistent spacing. These
//! helpers find the first line for a label and pull a typed value out of it.
//! A missing label or unparseable value is `None`, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").unwrap());

static PACKET_LOSS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?\d+(?:\.\d+)?)%\s+packet loss").unwrap());

// macOS: "round-trip min/avg/max/stddev = 9.1/12.4/18.0/3.2 ms"
// Linux: "rtt min/avg/max/mdev = 9.1/12.4/18.0/3.2 ms"
static RTT_SUMMARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"min/avg/max\S*\s*=\s*[\d.]+/([\d.]+)/").unwrap());

// iw: "Connected to 11:22:33:44:55:66 (on wlan0)"
static CONNECTED_BSSID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*Connected to ([0-9a-fA-F]{2}(?::[0-9a-fA-F]{2}){5})").unwrap()
});

/// Return the remainder of the first line labelled `label`, starting right
/// after the colon. Leading whitespace and whitespace before the colon are allowed.
fn labelled_line<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    if label.is_empty() {
        return None;
    }

    text.lines().find_map(|line| {
        line.trim_start()
            .strip_prefix(label)?
            .trim_start()
            .strip_prefix(':')
    })
}

/// Extract the first signed integer or decimal on the line labelled `label`.
pub fn extract_numeric(text: &str, label: &str) -> Option<f64> {
    let rest = labelled_line(text, label)?;
    NUMBER.find(rest)?.as_str().parse().ok()
}

/// Extract the string value of the line labelled `label`, trimmed.
/// An empty value counts as absent.
pub fn extract_string(text: &str, label: &str) -> Option<String> {
    let value = labelled_line(text, label)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Access point MAC from an iw `Connected to <mac>` line.
pub fn extract_connected_bssid(text: &str) -> Option<String> {
    CONNECTED_BSSID
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Wi-Fi channel number for a centre frequency in MHz.
pub fn channel_from_frequency(mhz: f64) -> Option<u32> {
    let mhz = mhz.round() as u32;
    match mhz {
        2484 => Some(14),
        2412..=2472 => Some((mhz - 2407) / 5),
        5160..=5885 => Some((mhz - 5000) / 5),
        5955..=7115 => Some((mhz - 5950) / 5),
        _ => None,
    }
}

/// Extract a whole dBm value, rounding any decimal reading.
pub fn extract_dbm(text: &str, label: &str) -> Option<i32> {
    extract_numeric(text, label).map(|v| v.round() as i32)
}

/// Packet loss percentage from a ping summary.
pub fn parse_packet_loss(output: &str) -> Option<f64> {
    PACKET_LOSS
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Average round-trip time in milliseconds from a ping summary.
pub fn parse_average_latency(output: &str) -> Option<f64> {
    RTT_SUMMARY
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// DNS query time in milliseconds from `dig` output.
pub fn parse_dns_query_time(output: &str) -> Option<f64> {
    extract_numeric(output, ";; Query time")
}
