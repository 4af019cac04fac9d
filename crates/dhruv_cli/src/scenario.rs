//! JSON scenario files: a natal chart plus the precomputed collaborator data.

use std::path::Path;

use dhruv_trayi::{
    DashaPeriod, DashaPeriodTable, NatalBindus, NatalChart, RawConfig, SnapshotEphemeris,
    SynthesisConfig, TrayiEngine, TrayiError,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub type ScenarioEngine = TrayiEngine<SnapshotEphemeris, DashaPeriodTable, NatalBindus>;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Trayi(#[from] TrayiError),
}

/// Everything the engine needs, as read from disk.
///
/// ```json
/// {
///   "chart": { "ascendant": 215.0, "grahas": { "Guru": { "longitude": 95.0 } } },
///   "dasha": [ { "level": "Mahadasha", "lord": "Guru", "start": "...", "end": "..." } ],
///   "snapshots": [ { "instant": "...", "positions": { "Surya": { "longitude": 260.0 } } } ],
///   "config": { "sub_period_depth": 2 }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub chart: NatalChart,
    pub dasha: Vec<DashaPeriod>,
    pub snapshots: SnapshotEphemeris,
    #[serde(default)]
    pub config: Option<RawConfig>,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let scenario = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            periods = scenario.dasha.len(),
            snapshots = scenario.snapshots.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Validate the config and assemble an engine with natal bindus.
    pub fn into_engine(self) -> Result<(NatalChart, ScenarioEngine), ScenarioError> {
        let config = match self.config {
            Some(raw) => SynthesisConfig::try_from(raw).map_err(TrayiError::from)?,
            None => SynthesisConfig::default(),
        };
        let bindus = NatalBindus::from_chart(&self.chart)?;
        let engine = TrayiEngine::new(
            config,
            self.snapshots,
            DashaPeriodTable::new(self.dasha),
            bindus,
        );
        Ok((self.chart, engine))
    }
}
