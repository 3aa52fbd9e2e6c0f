use crate::core::MonitorConfig;
use anyhow::Result;
use colored::Colorize;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show_config(),
        Some(("path", _)) => show_path(),
        Some(("init", sub_matches)) => init_config(sub_matches.get_flag("force")),
        _ => {
            println!("Use 'wifimon config --help' for more information.");
            Ok(())
        }
    }
}

/// Print the effective configuration (file + environment) as JSON
fn show_config() -> Result<()> {
    let config = MonitorConfig::load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn show_path() -> Result<()> {
    let path = MonitorConfig::get_config_path()?;
    let status = if path.exists() {
        "(exists)".green()
    } else {
        "(not created)".dimmed()
    };
    println!("{} {}", path.display(), status);
    Ok(())
}

fn init_config(force: bool) -> Result<()> {
    let path = MonitorConfig::get_config_path()?;

    if path.exists() && !force {
        println!(
            "{}",
            format!("Config file already exists: {}", path.display()).yellow()
        );
        println!("{}", "Use --force to overwrite it with defaults.".dimmed());
        return Ok(());
    }

    MonitorConfig::default().save()?;
    println!(
        "{} {}",
        "Default config written to".green(),
        path.display().to_string().bold()
    );
    Ok(())
}
