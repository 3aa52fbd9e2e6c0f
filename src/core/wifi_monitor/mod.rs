//! Wi-Fi monitoring core functionality.
//!
//! This module provides the sampling-and-alerting loop: typed extraction of
//! probe output, snapshot assembly, identity change detection, threshold
//! alerts and the diagnostic schedule.

pub mod alerts;
pub mod parser;
mod scheduler;
pub mod signal;
pub mod sink;
mod snapshot;
mod source;
mod state;

pub use alerts::{
    evaluate_alerts, Alert, AlertConfig, AlertKind, AlertSeverity, ROUTER_LOSS_THRESHOLD,
};
pub use scheduler::{Clock, CycleReport, ScheduleConfig, ScheduleState, SystemClock, WifiMonitor};
pub use signal::SignalTier;
pub use sink::{
    format_log_block, format_traceroute_block, FileLogSink, MonitorSink, BLOCK_SEPARATOR,
};
pub use snapshot::{
    display_metric, Snapshot, SnapshotBuilder, NUMERIC_PLACEHOLDER, STRING_PLACEHOLDER,
};
pub use source::{MetricSource, PingStats, ProbeKind, ProbeRunner, RadioLabels, RadioReading};
pub use state::{ChangeEvent, IdentityField, StateTracker};
