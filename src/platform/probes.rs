//! Probe commands executed on the host.
//!
//! Each [`ProbeKind`] maps to one argv built from the config at startup.
//! Non-zero exits still count as output when the tool printed something,
//! since `ping` exits non-zero on total loss but still reports `100% packet loss`.

use std::collections::HashMap;
use std::process::Command;

use crate::core::config::{MonitorConfig, INTERFACE_PLACEHOLDER};
use crate::core::wifi_monitor::{ProbeKind, ProbeRunner};
use crate::error::{Result, WifimonError};
use crate::platform::is_elevated;

/// Runs probes as external commands
#[derive(Debug, Clone)]
pub struct SystemProbes {
    commands: HashMap<ProbeKind, Vec<String>>,
}

impl SystemProbes {
    pub fn new(config: &MonitorConfig, interface: &str) -> Self {
        Self::with_elevation(config, interface, is_elevated())
    }

    /// Build commands as if the process were (or were not) elevated.
    pub fn with_elevation(config: &MonitorConfig, interface: &str, elevated: bool) -> Self {
        let substitute = |argv: &[String]| -> Vec<String> {
            argv.iter()
                .map(|arg| arg.replace(INTERFACE_PLACEHOLDER, interface))
                .collect()
        };

        let mut commands = HashMap::new();

        if let Some(identity) = config.radio.identity_command.as_deref() {
            if !identity.is_empty() {
                commands.insert(ProbeKind::RadioIdentity, substitute(identity));
            }
        }

        let mut info = Vec::new();
        if config.radio.privileged && !elevated {
            info.push("sudo".to_string());
            info.push("-n".to_string());
        }
        info.extend(substitute(&config.radio.info_command));
        commands.insert(ProbeKind::RadioInfo, info);

        commands.insert(
            ProbeKind::InternetPing,
            ping_command(&config.internet_target, config.ping_count),
        );
        commands.insert(
            ProbeKind::RouterPing,
            ping_command(&config.router_ip, config.ping_count),
        );
        commands.insert(
            ProbeKind::DnsQuery,
            vec![
                "dig".to_string(),
                "+tries=1".to_string(),
                "+time=2".to_string(),
                config.dns_host.clone(),
            ],
        );
        commands.insert(
            ProbeKind::Traceroute,
            vec![
                "traceroute".to_string(),
                "-q".to_string(),
                "1".to_string(),
                "-w".to_string(),
                "2".to_string(),
                "-m".to_string(),
                config.traceroute_max_hops.to_string(),
                config.internet_target.clone(),
            ],
        );

        Self { commands }
    }

    pub fn command(&self, kind: ProbeKind) -> Option<&[String]> {
        self.commands.get(&kind).map(Vec::as_slice)
    }
}

fn ping_command(target: &str, count: u32) -> Vec<String> {
    // Bound the whole run so an unreachable host cannot stall the cycle.
    let deadline = (count + 2).to_string();

    #[cfg(target_os = "macos")]
    let deadline_flag = "-t";
    #[cfg(not(target_os = "macos"))]
    let deadline_flag = "-w";

    vec![
        "ping".to_string(),
        "-q".to_string(),
        "-c".to_string(),
        count.to_string(),
        deadline_flag.to_string(),
        deadline,
        target.to_string(),
    ]
}

impl ProbeRunner for SystemProbes {
    fn run(&mut self, kind: ProbeKind) -> Result<String> {
        let argv = self.command(kind).ok_or_else(|| {
            WifimonError::probe_unavailable(format!("no command configured for {}", kind.name()))
        })?;
        let (program, args) = argv.split_first().ok_or_else(|| {
            WifimonError::probe_unavailable(format!("empty command for {}", kind.name()))
        })?;

        which::which(program).map_err(|_| {
            WifimonError::probe_unavailable(format!("'{}' not found in PATH", program))
        })?;

        let output = Command::new(program).args(args).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() && stdout.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WifimonError::probe_failed(format!(
                "{} exited with {}: {}",
                kind.name(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(stdout)
    }

    fn supports(&self, kind: ProbeKind) -> bool {
        self.commands.contains_key(&kind)
    }
}
