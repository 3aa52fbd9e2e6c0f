//! The sampling loop.
//!
//! A single thread runs one cycle after another: build a snapshot, diff the
//! identity, evaluate alerts, dispatch to sinks, and run the traceroute
//! diagnostic when its own interval has elapsed. The diagnostic check is a
//! monotonic-clock comparison made once per cycle, so its period is quantized
//! to the sampling interval.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::alerts::{evaluate_alerts, Alert, AlertConfig};
use super::sink::MonitorSink;
use super::snapshot::{Snapshot, SnapshotBuilder};
use super::source::{ProbeKind, ProbeRunner};
use super::state::{ChangeEvent, StateTracker};

const SLEEP_SLICE: Duration = Duration::from_millis(250);

/// Time source for the loop
pub trait Clock {
    /// Monotonic time since an arbitrary fixed origin
    fn now(&self) -> Duration;

    /// Wall-clock time for snapshot timestamps
    fn wall(&self) -> DateTime<Local>;

    /// Sleep for `duration`, returning early once `stop` is set
    fn sleep(&mut self, duration: Duration, stop: &AtomicBool);
}

/// Real clock backed by [`Instant`]
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wall(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&mut self, duration: Duration, stop: &AtomicBool) {
        let deadline = Instant::now() + duration;
        while !stop.load(Ordering::Relaxed) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            std::thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}

/// Sampling cadences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub interval: Duration,
    pub traceroute_interval: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            traceroute_interval: Duration::from_secs(300),
        }
    }
}

/// Diagnostic bookkeeping, mutated only by the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleState {
    /// Monotonic time of the last traceroute; `None` until the first run
    pub last_traceroute: Option<Duration>,
}

impl ScheduleState {
    pub fn traceroute_due(&self, now: Duration, interval: Duration) -> bool {
        match self.last_traceroute {
            None => true,
            Some(last) => now.saturating_sub(last) >= interval,
        }
    }
}

/// Everything one cycle produced
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub snapshot: Snapshot,
    pub changes: Vec<ChangeEvent>,
    pub alerts: Vec<Alert>,
    pub ran_diagnostic: bool,
}

/// Drives sampling, change detection, alerting and diagnostics.
pub struct WifiMonitor<P: ProbeRunner, C: Clock> {
    probes: P,
    clock: C,
    builder: SnapshotBuilder,
    tracker: StateTracker,
    alert_config: AlertConfig,
    schedule: ScheduleConfig,
    state: ScheduleState,
    sinks: Vec<Box<dyn MonitorSink>>,
    cycles: u64,
}

impl<P: ProbeRunner, C: Clock> WifiMonitor<P, C> {
    pub fn new(
        probes: P,
        clock: C,
        builder: SnapshotBuilder,
        alert_config: AlertConfig,
        schedule: ScheduleConfig,
    ) -> Self {
        Self {
            probes,
            clock,
            builder,
            tracker: StateTracker::new(),
            alert_config,
            schedule,
            state: ScheduleState::default(),
            sinks: Vec::new(),
            cycles: 0,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn MonitorSink>) {
        self.sinks.push(sink);
    }

    pub fn schedule_state(&self) -> ScheduleState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn probes(&self) -> &P {
        &self.probes
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one full cycle, including the diagnostic when it is due.
    pub fn run_cycle(&mut self) -> CycleReport {
        let now = self.clock.now();
        let mut report = self.sample();

        if self
            .state
            .traceroute_due(now, self.schedule.traceroute_interval)
        {
            self.run_diagnostic();
            self.state.last_traceroute = Some(now);
            report.ran_diagnostic = true;
        }

        report
    }

    /// Build, diff, evaluate and dispatch one snapshot without the diagnostic.
    pub fn sample(&mut self) -> CycleReport {
        let timestamp = self.clock.wall();
        let snapshot = self.builder.build(&mut self.probes, timestamp);

        let changes = self.tracker.observe(&snapshot);
        for event in &changes {
            self.dispatch("change", |sink| sink.record_change(event));
        }

        let alerts = evaluate_alerts(&snapshot, &self.alert_config);
        for alert in &alerts {
            self.dispatch("alert", |sink| sink.record_alert(alert));
        }

        self.dispatch("snapshot", |sink| sink.record_snapshot(&snapshot));
        self.cycles += 1;

        CycleReport {
            snapshot,
            changes,
            alerts,
            ran_diagnostic: false,
        }
    }

    fn run_diagnostic(&mut self) {
        match self.probes.run(ProbeKind::Traceroute) {
            Ok(output) => self.dispatch("diagnostic", |sink| sink.record_diagnostic(&output)),
            Err(e) => log::warn!("Traceroute failed: {}", e),
        }
    }

    fn dispatch<F>(&mut self, what: &str, mut record: F)
    where
        F: FnMut(&mut Box<dyn MonitorSink>) -> crate::error::Result<()>,
    {
        for sink in self.sinks.iter_mut() {
            if let Err(e) = record(sink) {
                log::warn!("Failed to record {}: {}", what, e);
            }
        }
    }

    /// Sleep one sampling interval, waking early if `stop` is set.
    pub fn sleep_interval(&mut self, stop: &AtomicBool) {
        self.clock.sleep(self.schedule.interval, stop);
    }

    /// Run cycles until `stop` is set, sleeping the sampling interval between them.
    pub fn run(&mut self, stop: &AtomicBool) -> u64 {
        log::info!(
            "Monitor started (interval {:?}, traceroute every {:?})",
            self.schedule.interval,
            self.schedule.traceroute_interval
        );

        while !stop.load(Ordering::Relaxed) {
            self.run_cycle();
            self.sleep_interval(stop);
        }

        log::info!("Monitor stopped after {} cycles", self.cycles);
        self.cycles
    }
}
