use std::io;
use thiserror::Error;

/// Custom error type for wifimon
#[derive(Error, Debug)]
pub enum WifimonError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Probe not available: {0}")]
    ProbeUnavailable(String),

    #[error("Probe failed: {0}")]
    ProbeFailed(String),

    #[error("Elevation required: {0}")]
    ElevationRequired(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for wifimon
pub type Result<T> = std::result::Result<T, WifimonError>;

impl WifimonError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        WifimonError::Config(msg.into())
    }

    /// Create a probe-unavailable error (binary missing or not configured)
    pub fn probe_unavailable<S: Into<String>>(msg: S) -> Self {
        WifimonError::ProbeUnavailable(msg.into())
    }

    /// Create a probe-failed error (spawned but produced nothing usable)
    pub fn probe_failed<S: Into<String>>(msg: S) -> Self {
        WifimonError::ProbeFailed(msg.into())
    }

    /// Create an elevation required error
    pub fn elevation_required<S: Into<String>>(msg: S) -> Self {
        WifimonError::ElevationRequired(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WifimonError::Other(msg.into())
    }
}
