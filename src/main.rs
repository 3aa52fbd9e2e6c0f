use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use wifimon::commands;

fn monitor_args() -> Vec<Arg> {
    vec![
        Arg::new("log-file")
            .long("log-file")
            .value_name("PATH")
            .help("Append snapshot blocks to this file")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("target")
            .short('t')
            .long("target")
            .value_name("HOST")
            .help("Internet host to ping (default: 8.8.8.8)"),
        Arg::new("router")
            .short('r')
            .long("router")
            .value_name("IP")
            .help("Router IP to ping (default: 192.168.1.1)"),
        Arg::new("interface")
            .short('i')
            .long("interface")
            .value_name("NAME")
            .help("Wireless interface name (default: auto-detect)"),
        Arg::new("signal-threshold")
            .long("signal-threshold")
            .value_name("DBM")
            .help("Alert when RSSI drops below this value (default: -70)")
            .allow_negative_numbers(true)
            .value_parser(clap::value_parser!(i32)),
        Arg::new("loss-threshold")
            .long("loss-threshold")
            .value_name("PERCENT")
            .help("Alert when internet packet loss exceeds this value (default: 5)")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("interval")
            .short('n')
            .long("interval")
            .value_name("SECONDS")
            .help("Seconds between samples (default: 10)")
            .value_parser(clap::value_parser!(u64).range(1..)),
        Arg::new("traceroute-interval")
            .long("traceroute-interval")
            .value_name("SECONDS")
            .help("Seconds between traceroute diagnostics (default: 300)")
            .value_parser(clap::value_parser!(u64).range(1..)),
    ]
}

fn build_cli() -> Command {
    Command::new("wifimon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Continuous Wi-Fi connection health monitor")
        .long_about(
            "Continuous Wi-Fi connection health monitor\n\n\
             Samples signal, noise, transmit rate, packet loss, latency and DNS time,\n\
             logs a block per sample and raises alerts on degradation or SSID/BSSID changes.\n\n\
             Running without a subcommand is the same as 'wifimon watch'.",
        )
        .args(monitor_args())
        .subcommand(
            Command::new("watch")
                .about("Monitor the connection continuously (default)")
                .args(monitor_args()),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Take a single sample and print it")
                .args(monitor_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the sample as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("log")
                        .long("log")
                        .help("Also append the sample to the log file")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'wifimon config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(
                    Command::new("init")
                        .about("Write a config file with default values")
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .help("Overwrite an existing config file")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for (bash, zsh, fish, powershell, elvish)")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn main() -> Result<()> {
    wifimon::init_logging();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("watch", sub_matches)) => commands::watch(sub_matches),
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        Some(("completions", sub_matches)) => {
            let mut cli = build_cli();
            commands::completions::execute(sub_matches, &mut cli)
        }
        Some(("version", _)) => commands::version(),
        _ => commands::watch(&matches),
    }
}
