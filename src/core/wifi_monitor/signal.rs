use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete signal quality tier derived from RSSI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalTier {
    #[default]
    Unknown,
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

// Inclusive lower bounds, strongest first.
const LADDER: [(i32, SignalTier); 4] = [
    (-50, SignalTier::Excellent),
    (-60, SignalTier::VeryGood),
    (-67, SignalTier::Good),
    (-70, SignalTier::Fair),
];

impl SignalTier {
    /// Classify an RSSI reading in dBm.
    pub fn classify(rssi: Option<i32>) -> Self {
        let Some(rssi) = rssi else {
            return SignalTier::Unknown;
        };

        LADDER
            .iter()
            .find(|(floor, _)| rssi >= *floor)
            .map(|(_, tier)| *tier)
            .unwrap_or(SignalTier::Poor)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalTier::Unknown => "Unknown",
            SignalTier::Poor => "Poor",
            SignalTier::Fair => "Fair",
            SignalTier::Good => "Good",
            SignalTier::VeryGood => "Very Good",
            SignalTier::Excellent => "Excellent",
        }
    }

    /// Rough quality percentage shown next to the label.
    pub fn percent(&self) -> Option<u8> {
        match self {
            SignalTier::Unknown => None,
            SignalTier::Poor => Some(20),
            SignalTier::Fair => Some(40),
            SignalTier::Good => Some(60),
            SignalTier::VeryGood => Some(80),
            SignalTier::Excellent => Some(100),
        }
    }
}

impl fmt::Display for SignalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(pct) => write!(f, "{} {}%", self.label(), pct),
            None => write!(f, "{}", self.label()),
        }
    }
}
