// End-to-end cycles against scripted probes

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

use wifimon::core::wifi_monitor::{
    AlertKind, AlertSeverity, FileLogSink, IdentityField, ProbeKind, RadioLabels, SignalTier,
};

use super::common::{
    build_monitor, build_monitor_with_labels, ping_text, radio_text, BrokenSink, Recorded,
    RecordingSink, ScriptedProbes,
};

const DIG_OUTPUT: &str = ";; ANSWER SECTION:\ngoogle.com.\t300\tIN\tA\t142.250.72.14\n\n;; Query time: 23 msec\n";

fn healthy_cycle(probes: &mut ScriptedProbes, ssid: &str, bssid: &str) {
    probes
        .push(ProbeKind::RadioInfo, &radio_text(ssid, bssid, -45))
        .push(ProbeKind::InternetPing, &ping_text("0.0", "14.200"))
        .push(ProbeKind::RouterPing, &ping_text("0.0", "2.100"))
        .push(ProbeKind::DnsQuery, DIG_OUTPUT);
}

#[test]
fn test_ssid_change_is_logged_once() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("wifi_monitor.log");

    let mut probes = ScriptedProbes::default();
    healthy_cycle(&mut probes, "HomeNet", "aa:aa:aa:aa:aa:aa");
    healthy_cycle(&mut probes, "HomeNet", "aa:aa:aa:aa:aa:aa");
    healthy_cycle(&mut probes, "CafeWifi", "bb:bb:bb:bb:bb:bb");

    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let mut monitor = build_monitor(probes, 10, 300);
    monitor.add_sink(Box::new(RecordingSink(Rc::clone(&recorded))));
    monitor.add_sink(Box::new(FileLogSink::open(&log_path).unwrap()));

    let first = monitor.sample();
    let second = monitor.sample();
    let third = monitor.sample();

    assert_eq!(first.changes.len(), 2);
    assert!(second.changes.is_empty());
    assert_eq!(third.changes.len(), 2);
    assert_eq!(third.changes[0].field, IdentityField::Ssid);
    assert_eq!(third.changes[0].old_value, "HomeNet");
    assert_eq!(third.changes[0].new_value, "CafeWifi");
    assert_eq!(third.changes[1].field, IdentityField::Bssid);

    let snapshot = &third.snapshot;
    assert_eq!(snapshot.rssi, Some(-45));
    assert_eq!(snapshot.signal_tier, SignalTier::Excellent);
    assert_eq!(snapshot.latency_ms, Some(14.2));
    assert_eq!(snapshot.dns_time_ms, Some(23.0));
    assert!(third.alerts.is_empty());

    let recorded = recorded.borrow();
    assert_eq!(recorded.snapshots.len(), 3);
    assert_eq!(recorded.changes.len(), 4);

    let log = fs::read_to_string(&log_path).unwrap();
    assert_eq!(
        log.matches("SSID changed from 'HomeNet' to 'CafeWifi'").count(),
        1
    );
    assert_eq!(log.matches("Interface: en0 | SSID: HomeNet").count(), 2);
    assert_eq!(log.matches("Interface: en0 | SSID: CafeWifi").count(), 1);
}

#[test]
fn test_router_loss_alert_without_internet_data() {
    let mut probes = ScriptedProbes::default();
    probes
        .push(ProbeKind::RadioInfo, &radio_text("HomeNet", "aa", -55))
        .push(
            ProbeKind::RouterPing,
            "--- 192.168.1.1 ping statistics ---\n5 packets transmitted, 0 packets received, 100.0% packet loss\n",
        );

    let mut monitor = build_monitor(probes, 10, 300);
    let report = monitor.sample();

    assert_eq!(report.snapshot.internet_loss_pct, None);
    assert_eq!(report.snapshot.latency_ms, None);
    assert_eq!(report.snapshot.router_loss_pct, Some(100.0));
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].kind, AlertKind::RouterLoss);
    assert_eq!(report.alerts[0].severity, AlertSeverity::Critical);
}

#[test]
fn test_weak_signal_and_internet_loss_alerts() {
    let mut probes = ScriptedProbes::default();
    probes
        .push(ProbeKind::RadioInfo, &radio_text("HomeNet", "aa", -78))
        .push(ProbeKind::InternetPing, &ping_text("20.0", "80.000"))
        .push(ProbeKind::RouterPing, &ping_text("0.0", "2.000"));

    let mut monitor = build_monitor(probes, 10, 300);
    let report = monitor.sample();

    let kinds: Vec<AlertKind> = report.alerts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AlertKind::WeakSignal, AlertKind::InternetLoss]);
    assert_eq!(report.snapshot.signal_tier, SignalTier::Poor);
    assert_eq!(report.snapshot.dns_time_ms, None);
}

#[test]
fn test_structured_source_is_merged_with_plain_text() {
    let mut probes = ScriptedProbes::with_identity_source();
    probes
        .push(
            ProbeKind::RadioIdentity,
            r#"{"ssid": "Office", "bssid": "cc:cc:cc:cc:cc:cc", "interface": "en1"}"#,
        )
        .push(ProbeKind::RadioInfo, &radio_text("Ignored", "dd", -62));

    let mut monitor = build_monitor(probes, 10, 300);
    let report = monitor.sample();

    assert_eq!(report.snapshot.ssid.as_deref(), Some("Office"));
    assert_eq!(report.snapshot.bssid.as_deref(), Some("cc:cc:cc:cc:cc:cc"));
    assert_eq!(report.snapshot.interface, "en1");
    assert_eq!(report.snapshot.rssi, Some(-62));
    assert_eq!(report.snapshot.noise, Some(-90));
    assert_eq!(report.snapshot.signal_tier, SignalTier::Good);
}

#[test]
fn test_failed_structured_source_falls_back_to_plain_text() {
    let mut probes = ScriptedProbes::with_identity_source();
    probes.push(ProbeKind::RadioInfo, &radio_text("HomeNet", "aa", -45));

    let mut monitor = build_monitor(probes, 10, 300);
    let report = monitor.sample();

    assert_eq!(report.snapshot.ssid.as_deref(), Some("HomeNet"));
    assert_eq!(monitor.probes().count(ProbeKind::RadioIdentity), 1);
    assert_eq!(monitor.probes().count(ProbeKind::RadioInfo), 1);
}

#[test]
fn test_all_probes_failing_still_produces_snapshots() {
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let mut monitor = build_monitor(ScriptedProbes::default(), 10, 300);
    monitor.add_sink(Box::new(BrokenSink));
    monitor.add_sink(Box::new(RecordingSink(Rc::clone(&recorded))));

    for _ in 0..3 {
        let report = monitor.sample();
        assert_eq!(report.snapshot.ssid, None);
        assert_eq!(report.snapshot.signal_tier, SignalTier::Unknown);
        assert!(report.alerts.is_empty());
    }

    assert_eq!(monitor.cycles(), 3);
    assert_eq!(recorded.borrow().snapshots.len(), 3);
    // Only the first cycle sees a change from the empty startup identity.
    assert_eq!(recorded.borrow().changes.len(), 2);
}

fn iw_link(bssid: &str) -> String {
    format!(
        "Connected to {} (on wlan0)\n\tSSID: Office\n\tfreq: 5180\n\tRX: 1024 bytes (12 packets)\n\tsignal: -58 dBm\n\ttx bitrate: 866.7 MBit/s VHT-MCS 9 80MHz short GI VHT-NSS 2\n",
        bssid
    )
}

#[test]
fn test_iw_roam_between_access_points() {
    let mut probes = ScriptedProbes::default();
    probes
        .push(ProbeKind::RadioInfo, &iw_link("11:22:33:44:55:66"))
        .push(ProbeKind::RadioInfo, &iw_link("aa:bb:cc:dd:ee:ff"));

    let mut monitor = build_monitor_with_labels(probes, RadioLabels::iw(), 10, 300);

    let first = monitor.sample();
    assert_eq!(first.snapshot.bssid.as_deref(), Some("11:22:33:44:55:66"));
    assert_eq!(first.snapshot.channel.as_deref(), Some("36"));
    assert_eq!(first.snapshot.rssi, Some(-58));

    let roam = monitor.sample();
    assert_eq!(roam.changes.len(), 1);
    assert_eq!(roam.changes[0].field, IdentityField::Bssid);
    assert_eq!(roam.changes[0].old_value, "11:22:33:44:55:66");
    assert_eq!(roam.changes[0].new_value, "aa:bb:cc:dd:ee:ff");

    assert_eq!(monitor.tracker().previous_ssid(), "Office");
    assert_eq!(monitor.tracker().previous_bssid(), "aa:bb:cc:dd:ee:ff");
}
