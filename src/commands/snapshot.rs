//! One-shot snapshot command handler.
//!
//! Runs a single sampling cycle without the traceroute diagnostic.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::wifi_monitor::{FileLogSink, SnapshotBuilder, SystemClock, WifiMonitor};
use crate::platform::{ensure_probe_authorized, SystemProbes};
use crate::ui::{format_alert_line, format_details};

/// Execute the snapshot command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::resolve_config(matches)?;
    let interface = config.effective_interface();
    let json_output = matches.get_flag("json");
    let write_log = matches.get_flag("log");

    let mut probes = SystemProbes::new(&config, &interface);
    if let Err(e) = ensure_probe_authorized(&config, &mut probes) {
        log::warn!("Radio metrics will be missing: {}", e);
    }

    let mut monitor = WifiMonitor::new(
        probes,
        SystemClock::new(),
        SnapshotBuilder::new(config.radio.labels.clone(), interface),
        config.alert_config(),
        config.schedule(),
    );

    if write_log {
        let log_sink = FileLogSink::open(&config.log_file)
            .with_context(|| format!("Failed to open log file: {:?}", config.log_file))?;
        monitor.add_sink(Box::new(log_sink));
    }

    let report = monitor.sample();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Snapshot at".cyan().bold(),
        report.snapshot.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    println!();
    for (label, value) in format_details(&report.snapshot) {
        println!("  {:<14} {}", format!("{}:", label).dimmed(), value);
    }

    if !report.alerts.is_empty() {
        println!();
        for alert in &report.alerts {
            println!("{}", format_alert_line(alert).yellow());
        }
    }

    Ok(())
}
