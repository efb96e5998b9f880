//! ndsudo subprocess executor.
//! Runs `ndsudo nvme_raid-show` under a timeout and returns the raw stdout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::CollectError;

/// Helper subcommand that prints the RAID status document.
pub const RAID_SHOW_SUBCOMMAND: &str = "nvme_raid-show";

/// Source of raw RAID status bytes. Mocked in tests.
#[async_trait]
pub trait RaidExec: Send + Sync {
    async fn nvme_raid_info(&self) -> Result<Vec<u8>, CollectError>;
}

pub struct NdsudoExec {
    ndsudo_path: PathBuf,
    timeout: Duration,
}

impl NdsudoExec {
    pub fn new(ndsudo_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ndsudo_path: ndsudo_path.into(),
            timeout,
        }
    }

    /// Build the helper Command. The child is killed if its future is dropped (timeout).
    fn build_command(&self, args: &[&str]) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.ndsudo_path);
        cmd.args(args)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    async fn execute(&self, args: &[&str]) -> Result<Vec<u8>, CollectError> {
        let mut cmd = self.build_command(args);
        let command_line = format!("{} {}", self.ndsudo_path.display(), args.join(" "));

        debug!("executing '{}'", command_line);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                CollectError::Execution(format!("'{}' timed out after {:?}", command_line, self.timeout))
            })?
            .map_err(|e| CollectError::Execution(format!("error on '{}': {}", command_line, e)))?;

        if !output.status.success() {
            return Err(CollectError::Execution(format!(
                "error on '{}': {}: {}",
                command_line,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        trace!("'{}' returned {} bytes", command_line, output.stdout.len());
        Ok(output.stdout)
    }
}

#[async_trait]
impl RaidExec for NdsudoExec {
    async fn nvme_raid_info(&self) -> Result<Vec<u8>, CollectError> {
        self.execute(&[RAID_SHOW_SUBCOMMAND]).await
    }
}

/// Locate the ndsudo helper: explicit override, else next to the running executable.
pub fn locate_ndsudo(override_path: Option<&Path>) -> Result<PathBuf> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_exe()?
            .parent()
            .ok_or_else(|| anyhow!("Cannot determine executable directory"))?
            .join("ndsudo"),
    };

    if !path.exists() {
        return Err(anyhow!("ndsudo executable not found: {}", path.display()));
    }

    Ok(path)
}
