//! Typed accessors over raw probe output.
//!
//! Probes are reached through the [`ProbeRunner`] trait so the sampling loop
//! never knows how a command is spawned. Every accessor here converts probe
//! or parse failures into absent values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parser::{
    channel_from_frequency, extract_connected_bssid, extract_dbm, extract_numeric,
    extract_string, parse_average_latency, parse_dns_query_time, parse_packet_loss,
};
use crate::error::Result;

/// External probes consulted during a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeKind {
    /// Structured (JSON) identity source, optional
    RadioIdentity,
    /// Plain-text radio info utility
    RadioInfo,
    InternetPing,
    RouterPing,
    DnsQuery,
    Traceroute,
}

impl ProbeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProbeKind::RadioIdentity => "radio identity",
            ProbeKind::RadioInfo => "radio info",
            ProbeKind::InternetPing => "internet ping",
            ProbeKind::RouterPing => "router ping",
            ProbeKind::DnsQuery => "dns query",
            ProbeKind::Traceroute => "traceroute",
        }
    }
}

/// Runs a probe and hands back its raw textual output.
pub trait ProbeRunner {
    fn run(&mut self, kind: ProbeKind) -> Result<String>;

    /// Whether this runner has a command configured for `kind`.
    fn supports(&self, _kind: ProbeKind) -> bool {
        true
    }
}

impl<P: ProbeRunner + ?Sized> ProbeRunner for &mut P {
    fn run(&mut self, kind: ProbeKind) -> Result<String> {
        (**self).run(kind)
    }

    fn supports(&self, kind: ProbeKind) -> bool {
        (**self).supports(kind)
    }
}

/// Labels used to read the plain-text radio info block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioLabels {
    pub rssi: String,
    pub noise: String,
    pub tx_rate: String,
    pub channel: String,
    /// Centre frequency in MHz, used for the channel when no channel line exists
    pub frequency: String,
    pub ssid: String,
    pub bssid: String,
    pub interface: String,
}

impl Default for RadioLabels {
    fn default() -> Self {
        // `wdutil info` layout
        Self {
            rssi: "RSSI".to_string(),
            noise: "Noise".to_string(),
            tx_rate: "Tx Rate".to_string(),
            channel: "Channel".to_string(),
            frequency: String::new(),
            ssid: "SSID".to_string(),
            bssid: "BSSID".to_string(),
            interface: "Interface Name".to_string(),
        }
    }
}

impl RadioLabels {
    /// Labels for `iw dev <iface> link` output.
    ///
    /// iw prints no BSSID or channel line; the BSSID comes from the
    /// `Connected to` header and the channel from `freq`.
    pub fn iw() -> Self {
        Self {
            rssi: "signal".to_string(),
            noise: "noise".to_string(),
            tx_rate: "tx bitrate".to_string(),
            channel: "channel".to_string(),
            frequency: "freq".to_string(),
            ssid: "SSID".to_string(),
            bssid: "BSSID".to_string(),
            interface: "Interface".to_string(),
        }
    }
}

/// Radio-link and identity values from one read of the radio source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadioReading {
    pub interface: Option<String>,
    pub ssid: Option<String>,
    pub bssid: Option<String>,
    pub channel: Option<String>,
    pub rssi: Option<i32>,
    pub noise: Option<i32>,
    pub tx_rate: Option<f64>,
}

impl RadioReading {
    /// Parse radio output, picking the JSON path when the text is a JSON object.
    pub fn parse(text: &str, labels: &RadioLabels) -> Self {
        Self::from_json(text).unwrap_or_else(|| Self::from_text(text, labels))
    }

    /// Parse a colon-delimited plain-text block.
    pub fn from_text(text: &str, labels: &RadioLabels) -> Self {
        Self {
            interface: extract_string(text, &labels.interface),
            ssid: extract_string(text, &labels.ssid),
            bssid: extract_string(text, &labels.bssid)
                .or_else(|| extract_connected_bssid(text)),
            channel: extract_string(text, &labels.channel).or_else(|| {
                extract_numeric(text, &labels.frequency)
                    .and_then(channel_from_frequency)
                    .map(|channel| channel.to_string())
            }),
            rssi: extract_dbm(text, &labels.rssi),
            noise: extract_dbm(text, &labels.noise),
            tx_rate: extract_numeric(text, &labels.tx_rate),
        }
    }

    /// Parse a JSON object. Returns `None` if `text` is not a JSON object;
    /// missing or mistyped keys are absent fields.
    pub fn from_json(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text.trim()).ok()?;
        if !value.is_object() {
            return None;
        }

        Some(Self {
            interface: json_string(&value, "interface"),
            ssid: json_string(&value, "ssid"),
            bssid: json_string(&value, "bssid"),
            channel: json_string(&value, "channel"),
            rssi: json_number(&value, "rssi").map(|v| v.round() as i32),
            noise: json_number(&value, "noise").map(|v| v.round() as i32),
            tx_rate: json_number(&value, "tx_rate"),
        })
    }

    /// True when none of the radio-link metrics were found.
    pub fn lacks_signal(&self) -> bool {
        self.rssi.is_none() && self.noise.is_none() && self.tx_rate.is_none()
    }

    /// Fill missing radio-link metrics from a secondary reading.
    ///
    /// Only rssi, noise, tx_rate and channel are taken; identity fields and
    /// values already present are left alone.
    pub fn merge_signal_from(&mut self, secondary: RadioReading) {
        if self.rssi.is_none() {
            self.rssi = secondary.rssi;
        }
        if self.noise.is_none() {
            self.noise = secondary.noise;
        }
        if self.tx_rate.is_none() {
            self.tx_rate = secondary.tx_rate;
        }
        if self.channel.is_none() {
            self.channel = secondary.channel;
        }
    }
}

fn json_string(value: &Value, key: &str) -> Option<String> {
    let s = match value.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn json_number(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Loss and latency from one ping run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PingStats {
    pub loss_pct: Option<f64>,
    pub avg_latency_ms: Option<f64>,
}

impl PingStats {
    pub fn parse(output: &str) -> Self {
        Self {
            loss_pct: parse_packet_loss(output),
            avg_latency_ms: parse_average_latency(output),
        }
    }
}

/// Gathers typed metrics from a probe runner.
pub struct MetricSource<'a, P: ProbeRunner + ?Sized> {
    probes: &'a mut P,
    labels: &'a RadioLabels,
}

impl<'a, P: ProbeRunner + ?Sized> MetricSource<'a, P> {
    pub fn new(probes: &'a mut P, labels: &'a RadioLabels) -> Self {
        Self { probes, labels }
    }

    /// Read identity and radio metrics.
    ///
    /// With a structured identity source configured, it is consulted first and
    /// the plain-text source only fills missing radio-link metrics. If the
    /// structured source fails, the plain-text source supplies everything.
    pub fn read_radio(&mut self) -> RadioReading {
        if !self.probes.supports(ProbeKind::RadioIdentity) {
            return self.read_radio_text();
        }

        match self.probes.run(ProbeKind::RadioIdentity) {
            Ok(output) if !output.trim().is_empty() => {
                let mut reading = RadioReading::parse(&output, self.labels);
                if reading.lacks_signal() {
                    let secondary = self.read_radio_text();
                    reading.merge_signal_from(secondary);
                }
                reading
            }
            Ok(_) => {
                log::warn!("Structured radio source returned no output, falling back to plain text");
                self.read_radio_text()
            }
            Err(e) => {
                log::warn!("Structured radio source failed ({}), falling back to plain text", e);
                self.read_radio_text()
            }
        }
    }

    fn read_radio_text(&mut self) -> RadioReading {
        match self.probes.run(ProbeKind::RadioInfo) {
            Ok(output) => RadioReading::parse(&output, self.labels),
            Err(e) => {
                log::debug!("Radio info unavailable: {}", e);
                RadioReading::default()
            }
        }
    }

    /// Run a ping probe (`InternetPing` or `RouterPing`).
    pub fn ping(&mut self, kind: ProbeKind) -> PingStats {
        match self.probes.run(kind) {
            Ok(output) => PingStats::parse(&output),
            Err(e) => {
                log::debug!("{} unavailable: {}", kind.name(), e);
                PingStats::default()
            }
        }
    }

    /// DNS resolution time in milliseconds.
    pub fn dns_time(&mut self) -> Option<f64> {
        match self.probes.run(ProbeKind::DnsQuery) {
            Ok(output) => parse_dns_query_time(&output),
            Err(e) => {
                log::debug!("dns query unavailable: {}", e);
                None
            }
        }
    }
}
