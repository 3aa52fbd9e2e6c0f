//! Alert rules for connection degradation.
//!
//! Evaluates a snapshot against the configured thresholds. Absent metrics skip
//! their rule; they are never treated as a violation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::snapshot::Snapshot;

/// Router loss threshold (%). Separate from the configurable internet-loss
/// threshold.
pub const ROUTER_LOSS_THRESHOLD: f64 = 5.0;

/// Alert configuration with thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    pub signal_threshold: i32, // dBm, alert below
    pub loss_threshold: f64,   // %, alert above
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            signal_threshold: -70,
            loss_threshold: 5.0,
        }
    }
}

/// An individual alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub kind: AlertKind,
    pub message: String,
    pub value: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    WeakSignal,
    InternetLoss,
    RouterLoss,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// Every probe packet lost means the path is down, not merely degraded.
fn loss_severity(loss: f64) -> AlertSeverity {
    if loss >= 100.0 {
        AlertSeverity::Critical
    } else {
        AlertSeverity::Warning
    }
}

/// Evaluate a snapshot and generate alerts (signal, internet loss, router loss)
pub fn evaluate_alerts(snapshot: &Snapshot, config: &AlertConfig) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(rssi) = snapshot.rssi {
        if rssi < config.signal_threshold {
            alerts.push(Alert {
                severity: AlertSeverity::Warning,
                kind: AlertKind::WeakSignal,
                message: format!(
                    "Weak signal: {} dBm (threshold: {} dBm)",
                    rssi, config.signal_threshold
                ),
                value: f64::from(rssi),
                threshold: f64::from(config.signal_threshold),
            });
        }
    }

    if let Some(loss) = snapshot.internet_loss_pct {
        if loss > config.loss_threshold {
            alerts.push(Alert {
                severity: loss_severity(loss),
                kind: AlertKind::InternetLoss,
                message: format!(
                    "High packet loss: {}% (threshold: {}%)",
                    loss, config.loss_threshold
                ),
                value: loss,
                threshold: config.loss_threshold,
            });
        }
    }

    if let Some(loss) = snapshot.router_loss_pct {
        if loss > ROUTER_LOSS_THRESHOLD {
            alerts.push(Alert {
                severity: loss_severity(loss),
                kind: AlertKind::RouterLoss,
                message: format!(
                    "Router packet loss: {}% (threshold: {}%)",
                    loss, ROUTER_LOSS_THRESHOLD
                ),
                value: loss,
                threshold: ROUTER_LOSS_THRESHOLD,
            });
        }
    }

    alerts
}
