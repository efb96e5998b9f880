//! Config file load and validation.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::config::types::CollectorConfig;

/// Default config location: `config.json` next to the executable.
pub fn default_config_path() -> Result<PathBuf> {
    let exe_dir = std::env::current_exe()?
        .parent()
        .ok_or_else(|| anyhow!("Cannot determine executable directory"))?
        .to_path_buf();
    Ok(exe_dir.join("config.json"))
}

pub fn validate_config(config: &CollectorConfig) -> Result<()> {
    if config.collector.update_every == 0 {
        return Err(anyhow!("collector.update_every must be at least 1 second"));
    }
    config.collector.timeout()?;
    Ok(())
}

/// Load the config from `path` (or the default location). A missing file yields defaults.
pub async fn load_config(path: Option<&Path>) -> Result<CollectorConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    let config = if config_path.exists() {
        let content = tokio::fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config: {:?}", config_path))?;
        let config: CollectorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", config_path))?;
        info!("Loaded configuration from: {:?}", config_path);
        config
    } else {
        info!("Config file {:?} not found, using defaults", config_path);
        CollectorConfig::default()
    };

    validate_config(&config).with_context(|| format!("Invalid config: {:?}", config_path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(Some(&dir.path().join("config.json"))).await.unwrap();
        assert_eq!(config, CollectorConfig::default());
        assert_eq!(config.collector.update_every(), Duration::from_secs(10));
        assert_eq!(config.collector.timeout().unwrap(), Duration::from_secs(2));
        assert_eq!(config.logging.log_level, "INFO");
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"collector": {"timeout": 0.5, "ndsudo_path": "/usr/libexec/netdata/plugins.d/ndsudo"}}"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).await.unwrap();
        assert_eq!(config.collector.update_every, 10);
        assert_eq!(config.collector.timeout().unwrap(), Duration::from_millis(500));
        assert_eq!(
            config.collector.ndsudo_path.as_deref(),
            Some(Path::new("/usr/libexec/netdata/plugins.d/ndsudo"))
        );
        assert_eq!(config.logging.log_level, "INFO");
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"collector": {"update_every": 0}}"#).unwrap();
        assert!(load_config(Some(&path)).await.is_err());

        std::fs::write(&path, r#"{"collector": {"timeout": -1}}"#).unwrap();
        assert!(load_config(Some(&path)).await.is_err());

        std::fs::write(&path, "not json").unwrap();
        assert!(load_config(Some(&path)).await.is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"collector": {"timeout": 1e30}}"#).unwrap();
        let err = load_config(Some(&path)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("collector.timeout"), "{:#}", err);

        std::fs::write(&path, r#"{"collector": {"timeout": 0}}"#).unwrap();
        assert!(load_config(Some(&path)).await.is_err());
    }
}
