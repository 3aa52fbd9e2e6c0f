// Diagnostic cadence over simulated time

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use wifimon::core::wifi_monitor::{Clock, ProbeKind};

use super::common::{build_monitor, radio_text, Recorded, RecordingSink, ScriptedProbes};

#[test]
fn test_traceroute_runs_on_its_own_cadence() {
    let mut probes = ScriptedProbes::default();
    for _ in 0..4 {
        probes.push(ProbeKind::RadioInfo, &radio_text("HomeNet", "aa", -50));
    }
    for hop in 0..2 {
        probes.push(ProbeKind::Traceroute, &format!(" 1  192.168.1.1  {}.0 ms", hop));
    }

    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let mut monitor = build_monitor(probes, 1, 3);
    monitor.add_sink(Box::new(RecordingSink(Rc::clone(&recorded))));

    let stop = AtomicBool::new(false);
    let mut ran = Vec::new();
    for _ in 0..4 {
        ran.push(monitor.run_cycle().ran_diagnostic);
        monitor.sleep_interval(&stop);
    }

    assert_eq!(ran, vec![true, false, false, true]);
    assert_eq!(
        monitor.schedule_state().last_traceroute,
        Some(Duration::from_secs(3))
    );
    assert_eq!(monitor.probes().count(ProbeKind::Traceroute), 2);
    assert_eq!(recorded.borrow().diagnostics.len(), 2);
    assert_eq!(recorded.borrow().snapshots.len(), 4);
    assert_eq!(monitor.clock().now(), Duration::from_secs(4));
}

#[test]
fn test_failed_traceroute_still_advances_schedule() {
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let mut monitor = build_monitor(ScriptedProbes::default(), 1, 3);
    monitor.add_sink(Box::new(RecordingSink(Rc::clone(&recorded))));

    let report = monitor.run_cycle();

    assert!(report.ran_diagnostic);
    assert_eq!(
        monitor.schedule_state().last_traceroute,
        Some(Duration::ZERO)
    );
    assert!(recorded.borrow().diagnostics.is_empty());
}

#[test]
fn test_run_returns_immediately_when_stopped() {
    let mut monitor = build_monitor(ScriptedProbes::default(), 1, 3);
    let stop = AtomicBool::new(true);

    assert_eq!(monitor.run(&stop), 0);
    assert!(monitor.probes().calls.is_empty());
}
