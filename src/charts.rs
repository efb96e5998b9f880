//! Dashboard chart definitions: the per-array state chart template and the
//! collection charts are registered into.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::raid::RaidState;

/// Base priority for collector charts on the dashboard.
pub const PRIO_RAID_STATE: u32 = 70000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dim {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub id: String,
    pub title: String,
    pub units: String,
    #[serde(rename = "family")]
    pub fam: String,
    #[serde(rename = "context")]
    pub ctx: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub priority: u32,
    pub labels: Vec<Label>,
    pub dims: Vec<Dim>,
}

/// State chart for one RAID array: one dimension per canonical state.
pub fn raid_state_chart(raid_name: &str) -> Chart {
    Chart {
        id: format!("raid_{}_state", raid_name),
        title: "RAID State".to_string(),
        units: "status".to_string(),
        fam: "raid state".to_string(),
        ctx: "nvme_raid.raid_state".to_string(),
        chart_type: ChartType::Line,
        priority: PRIO_RAID_STATE,
        labels: vec![Label {
            key: "raid_name".to_string(),
            value: raid_name.to_string(),
        }],
        dims: RaidState::ALL
            .iter()
            .map(|state| Dim {
                id: state_metric_id(raid_name, *state),
                name: state.as_str().to_string(),
            })
            .collect(),
    }
}

/// All charts materialized for a newly seen array.
pub fn raid_charts(raid_name: &str) -> Vec<Chart> {
    vec![raid_state_chart(raid_name)]
}

/// Metric prefix shared by every series of one array.
pub fn raid_prefix(raid_name: &str) -> String {
    format!("raid_{}_", raid_name)
}

/// `raid_<name>_state_<state>`; also the dimension ID of the state chart.
pub fn state_metric_id(raid_name: &str, state: RaidState) -> String {
    format!("{}state_{}", raid_prefix(raid_name), state.as_str())
}

/// Registered charts, in registration order. IDs are unique.
#[derive(Debug, Default)]
pub struct Charts {
    charts: Vec<Chart>,
}

impl Charts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add charts, rejecting any whose ID is already registered.
    /// Charts before the first duplicate are kept.
    pub fn add(&mut self, charts: Vec<Chart>) -> Result<(), ChartError> {
        for chart in charts {
            if self.has(&chart.id) {
                return Err(ChartError::Duplicate(chart.id));
            }
            self.charts.push(chart);
        }
        Ok(())
    }

    pub fn has(&self, id: &str) -> bool {
        self.charts.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chart> {
        self.charts.iter()
    }
}

impl<'a> IntoIterator for &'a Charts {
    type Item = &'a Chart;
    type IntoIter = std::slice::Iter<'a, Chart>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
