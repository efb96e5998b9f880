//! Collector configuration structs and defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub collector: CollectorSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorSettings {
    pub update_every: u64,                  // seconds between ticks
    pub timeout: f64,                       // seconds allowed for the helper
    pub ndsudo_path: Option<PathBuf>,       // None = next to the executable
}

pub fn default_update_every() -> u64 { 10 }
pub fn default_timeout() -> f64 { 2.0 }

impl CollectorSettings {
    /// Helper timeout as a `Duration`. Rejects non-positive, NaN and out-of-range values.
    pub fn timeout(&self) -> Result<Duration> {
        if self.timeout <= 0.0 {
            return Err(anyhow!(
                "collector.timeout must be a positive number of seconds, got {}",
                self.timeout
            ));
        }
        Duration::try_from_secs_f64(self.timeout)
            .map_err(|e| anyhow!("collector.timeout {} is not a valid duration: {}", self.timeout, e))
    }

    pub fn update_every(&self) -> Duration {
        Duration::from_secs(self.update_every)
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            update_every: default_update_every(),
            timeout: default_timeout(),
            ndsudo_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub log_level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
        }
    }
}
