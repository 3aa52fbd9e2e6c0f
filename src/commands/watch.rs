//! Continuous monitor command handler.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::wifi_monitor::{FileLogSink, SnapshotBuilder, SystemClock, WifiMonitor};
use crate::platform::{ensure_probe_authorized, SystemProbes};
use crate::ui::ConsoleSink;

/// Execute the watch command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::resolve_config(matches)?;
    let interface = config.effective_interface();

    let mut probes = SystemProbes::new(&config, &interface);
    ensure_probe_authorized(&config, &mut probes)
        .context("Cannot start monitor: radio info probe is not usable")?;

    let log_sink = FileLogSink::open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {:?}", config.log_file))?;

    // Setup Ctrl+C handler
    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = stop.clone();
    ctrlc::set_handler(move || {
        stop_clone.store(true, Ordering::Relaxed);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    println!("{}", "Wi-Fi monitor started".cyan().bold());
    println!(
        "{} {} | {} {} | {} {}",
        "Interface:".dimmed(),
        interface,
        "Target:".dimmed(),
        config.internet_target,
        "Router:".dimmed(),
        config.router_ip
    );
    println!("{} {:?}", "Logging to:".dimmed(), log_sink.path());
    println!("{}", "Press Ctrl+C to stop".dimmed());
    println!();

    let mut monitor = WifiMonitor::new(
        probes,
        SystemClock::new(),
        SnapshotBuilder::new(config.radio.labels.clone(), interface),
        config.alert_config(),
        config.schedule(),
    );
    monitor.add_sink(Box::new(ConsoleSink::new()));
    monitor.add_sink(Box::new(log_sink));

    let cycles = monitor.run(&stop);

    println!();
    println!(
        "{} {}",
        "Monitor stopped after".yellow(),
        format!("{} cycle(s)", cycles).yellow().bold()
    );

    Ok(())
}
