use chrono::{DateTime, Local};
use serde::Serialize;

use super::signal::SignalTier;
use super::source::{MetricSource, ProbeKind, ProbeRunner, RadioLabels};

/// Placeholder rendered for absent numeric values
pub const NUMERIC_PLACEHOLDER: &str = "N/A";
/// Placeholder rendered for absent string values
pub const STRING_PLACEHOLDER: &str = "unknown";

/// Render an optional metric, substituting [`NUMERIC_PLACEHOLDER`].
pub fn display_metric<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NUMERIC_PLACEHOLDER.to_string(),
    }
}

/// One cycle's view of the connection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Local>,
    pub interface: String,
    pub ssid: Option<String>,
    pub bssid: Option<String>,
    pub channel: Option<String>,
    pub rssi: Option<i32>,
    pub noise: Option<i32>,
    pub tx_rate: Option<f64>,
    pub signal_tier: SignalTier,
    pub internet_loss_pct: Option<f64>,
    pub router_loss_pct: Option<f64>,
    pub latency_ms: Option<f64>,
    pub dns_time_ms: Option<f64>,
}

impl Snapshot {
    /// Snapshot with every metric absent.
    pub fn empty(timestamp: DateTime<Local>, interface: impl Into<String>) -> Self {
        Self {
            timestamp,
            interface: interface.into(),
            ssid: None,
            bssid: None,
            channel: None,
            rssi: None,
            noise: None,
            tx_rate: None,
            signal_tier: SignalTier::Unknown,
            internet_loss_pct: None,
            router_loss_pct: None,
            latency_ms: None,
            dns_time_ms: None,
        }
    }

    /// SSID for display and comparison, with the placeholder for absence.
    pub fn ssid_or_placeholder(&self) -> &str {
        self.ssid.as_deref().unwrap_or(STRING_PLACEHOLDER)
    }

    pub fn bssid_or_placeholder(&self) -> &str {
        self.bssid.as_deref().unwrap_or(STRING_PLACEHOLDER)
    }

    pub fn channel_or_placeholder(&self) -> &str {
        self.channel.as_deref().unwrap_or(STRING_PLACEHOLDER)
    }
}

/// Assembles a [`Snapshot`] from the configured probes.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    labels: RadioLabels,
    fallback_interface: String,
}

impl SnapshotBuilder {
    pub fn new(labels: RadioLabels, fallback_interface: impl Into<String>) -> Self {
        Self {
            labels,
            fallback_interface: fallback_interface.into(),
        }
    }

    /// Query every probe once and compose the snapshot.
    ///
    /// Probe order is fixed: radio, internet ping, router ping, DNS.
    pub fn build<P: ProbeRunner + ?Sized>(
        &self,
        probes: &mut P,
        timestamp: DateTime<Local>,
    ) -> Snapshot {
        let mut source = MetricSource::new(probes, &self.labels);

        let radio = source.read_radio();
        let internet = source.ping(ProbeKind::InternetPing);
        let router = source.ping(ProbeKind::RouterPing);
        let dns_time_ms = source.dns_time();

        Snapshot {
            timestamp,
            interface: radio
                .interface
                .unwrap_or_else(|| self.fallback_interface.clone()),
            ssid: radio.ssid,
            bssid: radio.bssid,
            channel: radio.channel,
            rssi: radio.rssi,
            noise: radio.noise,
            tx_rate: radio.tx_rate,
            signal_tier: SignalTier::classify(radio.rssi),
            internet_loss_pct: internet.loss_pct,
            router_loss_pct: router.loss_pct,
            latency_ms: internet.avg_latency_ms,
            dns_time_ms,
        }
    }
}
