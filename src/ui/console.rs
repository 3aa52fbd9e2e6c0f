// Console output for the monitor loop

use colored::Colorize;

use super::formatters::format_summary_line;
use crate::core::wifi_monitor::{Alert, AlertSeverity, ChangeEvent, MonitorSink, Snapshot};
use crate::error::Result;

/// Prefix for alert lines
pub const ALERT_PREFIX: &str = "[!]";

/// Console rendering of an alert line
pub fn format_alert_line(alert: &Alert) -> String {
    format!("{} {}", ALERT_PREFIX, alert.message)
}

/// Console rendering of an identity change
pub fn format_change_line(event: &ChangeEvent) -> String {
    format!("[~] {}", event)
}

/// Prints snapshots, alerts and identity changes to stdout.
///
/// Diagnostic output only goes to the log file.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl MonitorSink for ConsoleSink {
    fn record_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        println!("{}", format_summary_line(snapshot));
        Ok(())
    }

    fn record_change(&mut self, event: &ChangeEvent) -> Result<()> {
        println!("{}", format_change_line(event).cyan().bold());
        Ok(())
    }

    fn record_alert(&mut self, alert: &Alert) -> Result<()> {
        let line = format_alert_line(alert);
        match alert.severity {
            AlertSeverity::Critical => println!("{}", line.red().bold()),
            AlertSeverity::Warning => println!("{}", line.yellow()),
        }
        Ok(())
    }
}
