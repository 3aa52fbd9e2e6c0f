use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

use super::snapshot::Snapshot;

/// Identity field that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IdentityField {
    Ssid,
    Bssid,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityField::Ssid => write!(f, "SSID"),
            IdentityField::Bssid => write!(f, "BSSID"),
        }
    }
}

/// An SSID or BSSID transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEvent {
    pub field: IdentityField,
    pub old_value: String,
    pub new_value: String,
    pub timestamp: DateTime<Local>,
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed from '{}' to '{}'",
            self.field, self.old_value, self.new_value
        )
    }
}

/// Remembers the last seen identity and reports transitions.
///
/// Previous values start empty, so the first observation always reports.
#[derive(Debug, Default)]
pub struct StateTracker {
    previous_ssid: String,
    previous_bssid: String,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_ssid(&self) -> &str {
        &self.previous_ssid
    }

    pub fn previous_bssid(&self) -> &str {
        &self.previous_bssid
    }

    /// Compare `snapshot` against the stored identity, then store it.
    pub fn observe(&mut self, snapshot: &Snapshot) -> Vec<ChangeEvent> {
        let ssid = snapshot.ssid_or_placeholder();
        let bssid = snapshot.bssid_or_placeholder();
        let mut events = Vec::new();

        if ssid != self.previous_ssid {
            events.push(ChangeEvent {
                field: IdentityField::Ssid,
                old_value: self.previous_ssid.clone(),
                new_value: ssid.to_string(),
                timestamp: snapshot.timestamp,
            });
        }

        if bssid != self.previous_bssid {
            events.push(ChangeEvent {
                field: IdentityField::Bssid,
                old_value: self.previous_bssid.clone(),
                new_value: bssid.to_string(),
                timestamp: snapshot.timestamp,
            });
        }

        self.previous_ssid = ssid.to_string();
        self.previous_bssid = bssid.to_string();

        events
    }
}
