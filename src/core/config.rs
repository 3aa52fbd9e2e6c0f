use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::wifi_monitor::{AlertConfig, RadioLabels, ScheduleConfig};
use crate::error::WifimonError;

pub const ENV_LOG_FILE: &str = "WIFIMON_LOG_FILE";
pub const ENV_TARGET: &str = "WIFIMON_TARGET";
pub const ENV_ROUTER: &str = "WIFIMON_ROUTER";
pub const ENV_SIGNAL_THRESHOLD: &str = "WIFIMON_SIGNAL_THRESHOLD";
pub const ENV_LOSS_THRESHOLD: &str = "WIFIMON_LOSS_THRESHOLD";
pub const ENV_INTERVAL: &str = "WIFIMON_INTERVAL";
pub const ENV_TRACEROUTE_INTERVAL: &str = "WIFIMON_TRACEROUTE_INTERVAL";
pub const ENV_INTERFACE: &str = "WIFIMON_INTERFACE";

/// Placeholder substituted with the interface name inside probe commands
pub const INTERFACE_PLACEHOLDER: &str = "{interface}";

/// Where radio metrics come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioSourceConfig {
    /// Optional command printing a JSON object with `ssid`, `bssid`, `interface`
    pub identity_command: Option<Vec<String>>,
    /// Command printing a colon-delimited radio info block
    pub info_command: Vec<String>,
    /// Whether `info_command` needs root (run through `sudo -n` otherwise)
    pub privileged: bool,
    pub labels: RadioLabels,
}

impl Default for RadioSourceConfig {
    #[cfg(target_os = "macos")]
    fn default() -> Self {
        Self {
            identity_command: None,
            info_command: vec!["wdutil".to_string(), "info".to_string()],
            privileged: true,
            labels: RadioLabels::default(),
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn default() -> Self {
        Self {
            identity_command: None,
            info_command: vec![
                "iw".to_string(),
                "dev".to_string(),
                INTERFACE_PLACEHOLDER.to_string(),
                "link".to_string(),
            ],
            privileged: false,
            labels: RadioLabels::iw(),
        }
    }
}

/// Monitor configuration, read once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub log_file: PathBuf,
    pub internet_target: String,
    pub router_ip: String,
    pub dns_host: String,
    pub signal_threshold: i32,
    pub loss_threshold: f64,
    pub interval_secs: u64,
    pub traceroute_interval_secs: u64,
    pub ping_count: u32,
    pub traceroute_max_hops: u32,
    pub interface: Option<String>,
    pub radio: RadioSourceConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            internet_target: "8.8.8.8".to_string(),
            router_ip: "192.168.1.1".to_string(),
            dns_host: "google.com".to_string(),
            signal_threshold: -70,
            loss_threshold: 5.0,
            interval_secs: 10,
            traceroute_interval_secs: 300,
            ping_count: 5,
            traceroute_max_hops: 20,
            interface: None,
            radio: RadioSourceConfig::default(),
        }
    }
}

fn default_log_file() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("wifi_monitor.log"))
        .unwrap_or_else(|| PathBuf::from("wifi_monitor.log"))
}

impl MonitorConfig {
    /// Load the config file (if any), then apply `WIFIMON_*` environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific JSON file. A missing or empty file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("wifimon").join("config.json"))
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_LOG_FILE) {
            self.log_file = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_TARGET) {
            self.internet_target = value;
        }
        if let Some(value) = lookup(ENV_ROUTER) {
            self.router_ip = value;
        }
        if let Some(value) = lookup(ENV_INTERFACE) {
            self.interface = Some(value);
        }
        if let Some(value) = lookup(ENV_SIGNAL_THRESHOLD) {
            self.signal_threshold = parse_env(ENV_SIGNAL_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_LOSS_THRESHOLD) {
            self.loss_threshold = parse_env(ENV_LOSS_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_INTERVAL) {
            self.interval_secs = parse_env(ENV_INTERVAL, &value)?;
        }
        if let Some(value) = lookup(ENV_TRACEROUTE_INTERVAL) {
            self.traceroute_interval_secs = parse_env(ENV_TRACEROUTE_INTERVAL, &value)?;
        }
        Ok(())
    }

    /// Reject settings the loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(WifimonError::config("interval must be at least 1 second").into());
        }
        if self.traceroute_interval_secs == 0 {
            return Err(
                WifimonError::config("traceroute interval must be at least 1 second").into(),
            );
        }
        if self.ping_count == 0 {
            return Err(WifimonError::config("ping count must be at least 1").into());
        }
        if self.radio.info_command.is_empty() {
            return Err(WifimonError::config("radio info command is empty").into());
        }
        if !self.loss_threshold.is_finite() {
            return Err(WifimonError::config("loss threshold must be a number").into());
        }
        Ok(())
    }

    /// Interface name used when the radio source does not report one.
    pub fn effective_interface(&self) -> String {
        self.interface
            .clone()
            .or_else(crate::platform::default_wireless_interface)
            .unwrap_or_else(|| crate::platform::FALLBACK_INTERFACE.to_string())
    }

    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig {
            signal_threshold: self.signal_threshold,
            loss_threshold: self.loss_threshold,
        }
    }

    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig {
            interval: Duration::from_secs(self.interval_secs),
            traceroute_interval: Duration::from_secs(self.traceroute_interval_secs),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| WifimonError::config(format!("{} has invalid value '{}'", key, value)).into())
}
