//! Output sinks for monitor cycles.
//!
//! The loop dispatches each cycle's snapshot, identity changes, alerts and
//! diagnostic output to every registered sink. The log file sink keeps a
//! fixed human-readable block format and is append-only.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::alerts::Alert;
use super::snapshot::{display_metric, Snapshot};
use super::state::ChangeEvent;
use crate::error::Result;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const BLOCK_SEPARATOR: &str = "------------------------------------------------";
pub const TRACEROUTE_HEADER: &str = "--- Traceroute ---";
pub const TRACEROUTE_FOOTER: &str = "------------------";

/// Receives the outputs of a monitor cycle
pub trait MonitorSink {
    fn record_snapshot(&mut self, snapshot: &Snapshot) -> Result<()>;

    fn record_change(&mut self, event: &ChangeEvent) -> Result<()>;

    fn record_alert(&mut self, _alert: &Alert) -> Result<()> {
        Ok(())
    }

    fn record_diagnostic(&mut self, _output: &str) -> Result<()> {
        Ok(())
    }
}

/// Render the multi-line log block for a snapshot (without trailing newline).
pub fn format_log_block(snapshot: &Snapshot) -> String {
    format!(
        "{}\n\
         Interface: {} | SSID: {} | BSSID: {} | Channel: {}\n\
         RSSI: {} dBm ({}) | Noise: {} dBm | Rate: {} Mbps\n\
         Ping Loss: {}% | Avg Latency: {} ms | Router Loss: {}% | DNS Time: {} ms\n\
         {}",
        snapshot.timestamp.format(TIMESTAMP_FORMAT),
        snapshot.interface,
        snapshot.ssid_or_placeholder(),
        snapshot.bssid_or_placeholder(),
        snapshot.channel_or_placeholder(),
        display_metric(snapshot.rssi),
        snapshot.signal_tier,
        display_metric(snapshot.noise),
        display_metric(snapshot.tx_rate),
        display_metric(snapshot.internet_loss_pct),
        display_metric(snapshot.latency_ms),
        display_metric(snapshot.router_loss_pct),
        display_metric(snapshot.dns_time_ms),
        BLOCK_SEPARATOR,
    )
}

/// Render a framed diagnostic block (without trailing newline).
pub fn format_traceroute_block(output: &str) -> String {
    format!(
        "{}\n{}\n{}",
        TRACEROUTE_HEADER,
        output.trim_end(),
        TRACEROUTE_FOOTER
    )
}

/// Append-only log file sink
#[derive(Debug)]
pub struct FileLogSink {
    path: PathBuf,
    file: File,
}

impl FileLogSink {
    /// Open (or create) the log file in append mode, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        log::debug!("Logging snapshots to {:?}", path);

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&mut self, text: &str) -> Result<()> {
        writeln!(self.file, "{}", text)?;
        self.file.flush()?;
        Ok(())
    }
}

impl MonitorSink for FileLogSink {
    fn record_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.append(&format_log_block(snapshot))
    }

    fn record_change(&mut self, event: &ChangeEvent) -> Result<()> {
        self.append(&event.to_string())
    }

    fn record_diagnostic(&mut self, output: &str) -> Result<()> {
        self.append(&format_traceroute_block(output))
    }
}
