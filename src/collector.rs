//! NVMe RAID collector: helper output -> RAID records -> state flags -> metrics.
//! Owns the chart collection and the registry of arrays already charted.

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::charts::{raid_charts, state_metric_id, Charts};
use crate::config::persistence::validate_config;
use crate::config::types::CollectorConfig;
use crate::error::CollectError;
use crate::raid::{normalize, RaidArray};
use crate::system::executor::{locate_ndsudo, NdsudoExec, RaidExec};
use crate::system::parser::parse_raid_info;

/// Flat metric name -> value mapping produced by one tick.
pub type Metrics = BTreeMap<String, i64>;

pub struct RaidCollector {
    config: CollectorConfig,
    exec: Option<Box<dyn RaidExec>>,
    charts: Charts,
    /// Arrays whose charts have been registered. Never shrinks.
    seen: HashSet<String>,
}

impl RaidCollector {
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            config,
            exec: None,
            charts: Charts::new(),
            seen: HashSet::new(),
        }
    }

    /// Collector with an already constructed executor; `init` is not needed.
    pub fn with_exec(config: CollectorConfig, exec: Box<dyn RaidExec>) -> Self {
        let mut collector = Self::new(config);
        collector.exec = Some(exec);
        collector
    }

    /// Validate the config, locate ndsudo and build the executor.
    pub fn init(&mut self) -> Result<()> {
        validate_config(&self.config).context("nvme_raid config")?;

        let settings = &self.config.collector;
        let timeout = settings.timeout()?;
        let ndsudo = locate_ndsudo(settings.ndsudo_path.as_deref())
            .context("nvme_raid exec initialization")?;

        info!("Using ndsudo at {:?} (timeout {:?})", ndsudo, timeout);
        self.exec = Some(Box::new(NdsudoExec::new(ndsudo, timeout)));
        Ok(())
    }

    /// Run one tick and report whether it produced metrics. The caller reports failures.
    pub async fn check(&mut self) -> Result<(), CollectError> {
        self.collect_raw().await.map(|_| ())
    }

    /// Run one tick. Failures are logged and yield `None`.
    pub async fn collect(&mut self) -> Option<Metrics> {
        match self.collect_raw().await {
            Ok(mx) => Some(mx),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    pub fn charts(&self) -> &Charts {
        &self.charts
    }

    pub fn cleanup(&mut self) {
        self.exec = None;
    }

    /// One full cycle. Any error discards the whole tick.
    pub async fn collect_raw(&mut self) -> Result<Metrics, CollectError> {
        let exec = self
            .exec
            .as_ref()
            .ok_or_else(|| CollectError::Execution("executor not initialized".to_string()))?;

        let bytes = exec.nvme_raid_info().await?;
        let raids = parse_raid_info(&bytes)?;

        let mut mx = Metrics::new();
        for raid in raids.values() {
            self.collect_raid(&mut mx, raid)?;
        }

        if mx.is_empty() {
            return Err(CollectError::NoMetrics);
        }

        debug!("Collected {} metrics for {} RAID arrays", mx.len(), raids.len());
        Ok(mx)
    }

    fn collect_raid(&mut self, mx: &mut Metrics, raid: &RaidArray) -> Result<(), CollectError> {
        if self.seen.insert(raid.name.clone()) {
            self.add_raid_charts(&raid.name);
        }

        let flags = normalize(&raid.state).map_err(|e| CollectError::UnrecognizedState {
            raid: raid.name.clone(),
            state: e.0,
        })?;

        for (state, value) in flags.iter() {
            mx.insert(state_metric_id(&raid.name, state), value);
        }
        Ok(())
    }

    fn add_raid_charts(&mut self, raid_name: &str) {
        info!("New RAID array '{}', adding charts", raid_name);
        if let Err(e) = self.charts.add(raid_charts(raid_name)) {
            warn!("{}", e);
        }
    }
}
