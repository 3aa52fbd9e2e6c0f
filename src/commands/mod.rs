// Command handlers module
pub mod completions;
pub mod config;
pub mod snapshot;
pub mod version;
pub mod watch;

use anyhow::Result;
use clap::ArgMatches;
use std::path::PathBuf;

use crate::core::MonitorConfig;

// Re-exports for cleaner imports
pub use snapshot::execute as snapshot;
pub use version::execute as version;
pub use watch::execute as watch;

/// Look up an optional argument that may not be defined on this command.
fn arg<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Option<T> {
    matches.try_get_one::<T>(id).ok().flatten().cloned()
}

/// Load the config and apply command-line overrides on top of it.
pub(crate) fn resolve_config(matches: &ArgMatches) -> Result<MonitorConfig> {
    let mut config = MonitorConfig::load()?;

    if let Some(path) = arg::<PathBuf>(matches, "log-file") {
        config.log_file = path;
    }
    if let Some(target) = arg::<String>(matches, "target") {
        config.internet_target = target;
    }
    if let Some(router) = arg::<String>(matches, "router") {
        config.router_ip = router;
    }
    if let Some(interface) = arg::<String>(matches, "interface") {
        config.interface = Some(interface);
    }
    if let Some(threshold) = arg::<i32>(matches, "signal-threshold") {
        config.signal_threshold = threshold;
    }
    if let Some(threshold) = arg::<f64>(matches, "loss-threshold") {
        config.loss_threshold = threshold;
    }
    if let Some(interval) = arg::<u64>(matches, "interval") {
        config.interval_secs = interval;
    }
    if let Some(interval) = arg::<u64>(matches, "traceroute-interval") {
        config.traceroute_interval_secs = interval;
    }

    config.validate()?;
    Ok(config)
}
