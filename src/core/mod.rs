// Core business logic module

pub mod config;
pub mod wifi_monitor;

// Re-export commonly used items
pub use config::{MonitorConfig, RadioSourceConfig};
pub use wifi_monitor::{Snapshot, WifiMonitor};
