// Tests for config loading, overrides and validation

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use wifimon::core::config::{ENV_INTERVAL, ENV_LOG_FILE, ENV_SIGNAL_THRESHOLD, ENV_TARGET};
use wifimon::{MonitorConfig, WifimonError};

#[test]
fn test_missing_config_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wifimon").join("config.json");

    let config = MonitorConfig::load_from(&path).unwrap();

    assert_eq!(config, MonitorConfig::default());
    assert_eq!(config.internet_target, "8.8.8.8");
    assert_eq!(config.router_ip, "192.168.1.1");
    assert_eq!(config.signal_threshold, -70);
    assert_eq!(config.loss_threshold, 5.0);
    assert_eq!(config.interval_secs, 10);
    assert_eq!(config.traceroute_interval_secs, 300);
}

#[test]
fn test_saved_config_is_read_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let config = MonitorConfig {
        router_ip: "10.0.0.1".to_string(),
        signal_threshold: -65,
        interface: Some("wlp2s0".to_string()),
        ..MonitorConfig::default()
    };
    config.save_to(&path).unwrap();

    let loaded = MonitorConfig::load_from(&path).unwrap();
    assert_eq!(loaded.router_ip, "10.0.0.1");
    assert_eq!(loaded.signal_threshold, -65);
    assert_eq!(loaded.interface.as_deref(), Some("wlp2s0"));
}

#[test]
fn test_partial_config_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "interval_secs": 30 }"#).unwrap();

    let config = MonitorConfig::load_from(&path).unwrap();
    assert_eq!(config.interval_secs, 30);
    assert_eq!(config.internet_target, "8.8.8.8");
    assert_eq!(config.traceroute_interval_secs, 300);
}

#[test]
fn test_corrupt_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(MonitorConfig::load_from(&path).is_err());
}

#[test]
fn test_environment_overrides_file_values() {
    let mut config = MonitorConfig::default();
    config
        .apply_overrides(|key| match key {
            k if k == ENV_TARGET => Some("1.1.1.1".to_string()),
            k if k == ENV_SIGNAL_THRESHOLD => Some("-60".to_string()),
            k if k == ENV_INTERVAL => Some(" 2 ".to_string()),
            k if k == ENV_LOG_FILE => Some("/tmp/wifi.log".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.internet_target, "1.1.1.1");
    assert_eq!(config.signal_threshold, -60);
    assert_eq!(config.interval_secs, 2);
    assert_eq!(config.log_file, PathBuf::from("/tmp/wifi.log"));
    assert_eq!(config.router_ip, "192.168.1.1");
}

#[test]
fn test_malformed_override_is_a_config_error() {
    let mut config = MonitorConfig::default();
    let err = config
        .apply_overrides(|key| (key == ENV_INTERVAL).then(|| "soon".to_string()))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<WifimonError>(),
        Some(WifimonError::Config(_))
    ));
}

#[test]
fn test_zero_interval_fails_validation() {
    let config = MonitorConfig {
        interval_secs: 0,
        ..MonitorConfig::default()
    };
    assert!(config.validate().is_err());

    let config = MonitorConfig {
        traceroute_interval_secs: 0,
        ..MonitorConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_derived_settings() {
    let config = MonitorConfig {
        signal_threshold: -75,
        loss_threshold: 2.5,
        interval_secs: 1,
        traceroute_interval_secs: 3,
        interface: Some("wlan1".to_string()),
        ..MonitorConfig::default()
    };

    let alerts = config.alert_config();
    assert_eq!(alerts.signal_threshold, -75);
    assert_eq!(alerts.loss_threshold, 2.5);

    let schedule = config.schedule();
    assert_eq!(schedule.interval.as_secs(), 1);
    assert_eq!(schedule.traceroute_interval.as_secs(), 3);

    assert_eq!(config.effective_interface(), "wlan1");
}
