//! Command-line argument definitions (clap).

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "nvme-raid-collector")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "NVMe RAID state collector", long_about = None)]
pub struct Args {
    // === Config ===
    /// Path to config.json (default: next to the executable)
    #[arg(short = 'c', long, value_name = "PATH", help_heading = "Config")]
    pub config: Option<PathBuf>,

    /// Path to the ndsudo helper (overrides collector.ndsudo_path)
    #[arg(long, value_name = "PATH", help_heading = "Config")]
    pub ndsudo: Option<PathBuf>,

    /// Set log level (TRACE, DEBUG, INFO, WARN, ERROR, CRITICAL)
    #[arg(long = "log-level", help_heading = "Config")]
    pub log_level: Option<String>,

    // === Modes ===
    /// Run one collection and exit non-zero if it fails
    #[arg(long, help_heading = "Modes", conflicts_with_all = ["once", "charts"])]
    pub check: bool,

    /// Collect once, print charts and metrics, then exit
    #[arg(long, help_heading = "Modes", conflicts_with = "charts")]
    pub once: bool,

    /// Print the chart definitions for a RAID array name and exit
    #[arg(long, value_name = "RAID_NAME", help_heading = "Modes")]
    pub charts: Option<String>,
}

/// Resolve the tracing filter. Priority: flag, LOG_LEVEL env, config, info.
pub fn resolve_log_filter(flag: Option<&str>, config_level: &str) -> &'static str {
    let level = match flag {
        Some(l) => l.to_lowercase(),
        None => std::env::var("LOG_LEVEL")
            .map(|l| l.to_lowercase())
            .unwrap_or_else(|_| config_level.to_lowercase()),
    };

    match level.as_str() {
        "critical" => "error", // CRITICAL maps to ERROR level
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => {
            eprintln!(
                "Invalid log level '{}'. Using INFO. Valid levels: TRACE, DEBUG, INFO, WARN, ERROR, CRITICAL",
                level
            );
            "info"
        }
    }
}
