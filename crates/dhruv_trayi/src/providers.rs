//! Collaborator seams and reference implementations.
//!
//! The engine never computes planetary positions, dasha periods or bindu
//! tables on its own. It asks three providers:
//!
//! - [`EphemerisProvider`]: transit positions at an instant.
//! - [`DashaProvider`]: the ruling lords active at an instant.
//! - [`BinduTable`]: Ashtakavarga bindus per graha and rashi.
//!
//! Reference implementations cover the common cases: a table of
//! precomputed snapshots, a table of dasha periods, and bindu tables derived
//! from the natal chart.

use chrono::{DateTime, Utc};
use dhruv_vedic_base::{
    AshtakavargaResult, Contributor, DashaLevel, Graha, Rashi, calculate_ashtakavarga,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::chart::{NatalChart, PositionSnapshot};
use crate::error::{ProviderError, TrayiError};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Source of transit positions.
pub trait EphemerisProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn positions_at(&self, instant: DateTime<Utc>) -> Result<PositionSnapshot, ProviderError>;
}

/// Source of the active dasha lords.
pub trait DashaProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn ruling_lords_at(&self, instant: DateTime<Utc>) -> Result<RulingLords, ProviderError>;
}

/// Ashtakavarga bindu lookups.
pub trait BinduTable: Send + Sync {
    fn name(&self) -> &'static str;

    /// Own bindus (0..=8) of a graha in a rashi.
    fn bindus(&self, graha: Graha, rashi: Rashi) -> Result<u8, ProviderError>;

    /// Combined bindus (0..=56) in a rashi.
    fn combined_bindus(&self, rashi: Rashi) -> Result<u8, ProviderError>;

    /// Whether `contributor` gave `target` a bindu in `rashi`, when the table
    /// keeps the prastara.
    fn contributes(
        &self,
        _target: Graha,
        _contributor: Contributor,
        _rashi: Rashi,
    ) -> Option<bool> {
        None
    }

    /// Combined bindus per rashi after Trikona and Ekadhipatya Sodhana.
    fn sodhana_totals(&self) -> Option<[u8; 12]> {
        None
    }
}

// ---------------------------------------------------------------------------
// Ruling lords
// ---------------------------------------------------------------------------

/// One active period ruler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulingLord {
    pub level: DashaLevel,
    pub graha: Graha,
}

/// The simultaneously active rulers, outermost first. Empty means no
/// active dasha.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulingLords {
    lords: SmallVec<[RulingLord; 3]>,
}

impl RulingLords {
    /// Lords sorted by level; a repeated level keeps its first entry.
    pub fn new(lords: impl IntoIterator<Item = RulingLord>) -> Self {
        let mut out: SmallVec<[RulingLord; 3]> = SmallVec::new();
        for lord in lords {
            if !out.iter().any(|l| l.level == lord.level) {
                out.push(lord);
            }
        }
        out.sort_by_key(|l| l.level);
        Self { lords: out }
    }

    /// Lords given outermost first, starting at Mahadasha.
    pub fn from_grahas(grahas: &[Graha]) -> Self {
        Self::new(
            grahas
                .iter()
                .zip(dhruv_vedic_base::ALL_DASHA_LEVELS)
                .map(|(&graha, level)| RulingLord { level, graha }),
        )
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RulingLord> {
        self.lords.iter()
    }

    pub fn at(&self, level: DashaLevel) -> Option<Graha> {
        self.lords.iter().find(|l| l.level == level).map(|l| l.graha)
    }

    /// Lords whose level lies within `depth` (1 = Mahadasha only).
    pub fn within_depth(&self, depth: u8) -> Self {
        Self {
            lords: self
                .lords
                .iter()
                .filter(|l| l.level.within_depth(depth))
                .copied()
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reference providers
// ---------------------------------------------------------------------------

/// One dasha period at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub level: DashaLevel,
    pub lord: Graha,
    pub start: DateTime<Utc>,
    /// Exclusive.
    pub end: DateTime<Utc>,
}

impl DashaPeriod {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Dasha provider over a precomputed period list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashaPeriodTable {
    periods: Vec<DashaPeriod>,
}

impl DashaPeriodTable {
    pub fn new(periods: Vec<DashaPeriod>) -> Self {
        Self { periods }
    }

    pub fn periods(&self) -> &[DashaPeriod] {
        &self.periods
    }
}

impl DashaProvider for DashaPeriodTable {
    fn name(&self) -> &'static str {
        "dasha-period-table"
    }

    fn ruling_lords_at(&self, instant: DateTime<Utc>) -> Result<RulingLords, ProviderError> {
        Ok(RulingLords::new(
            self.periods
                .iter()
                .filter(|p| p.contains(instant))
                .map(|p| RulingLord {
                    level: p.level,
                    graha: p.lord,
                }),
        ))
    }
}

/// Ephemeris provider over precomputed snapshots. An instant resolves to
/// the latest snapshot at or before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PositionSnapshot>", into = "Vec<PositionSnapshot>")]
pub struct SnapshotEphemeris {
    snapshots: Vec<PositionSnapshot>,
}

impl SnapshotEphemeris {
    /// Snapshots are sorted by instant.
    pub fn new(mut snapshots: Vec<PositionSnapshot>) -> Self {
        snapshots.sort_by_key(|s| s.instant);
        Self { snapshots }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl From<Vec<PositionSnapshot>> for SnapshotEphemeris {
    fn from(snapshots: Vec<PositionSnapshot>) -> Self {
        Self::new(snapshots)
    }
}

impl From<SnapshotEphemeris> for Vec<PositionSnapshot> {
    fn from(table: SnapshotEphemeris) -> Self {
        table.snapshots
    }
}

impl EphemerisProvider for SnapshotEphemeris {
    fn name(&self) -> &'static str {
        "snapshot-ephemeris"
    }

    fn positions_at(&self, instant: DateTime<Utc>) -> Result<PositionSnapshot, ProviderError> {
        let idx = self.snapshots.partition_point(|s| s.instant <= instant);
        match idx.checked_sub(1).and_then(|i| self.snapshots.get(i)) {
            Some(snapshot) => Ok(snapshot.at(instant)),
            None => Err(ProviderError::new(format!(
                "no snapshot at or before {}",
                instant.to_rfc3339()
            ))),
        }
    }
}

/// Bindu tables derived from the natal sign placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatalBindus {
    result: AshtakavargaResult,
}

impl NatalBindus {
    /// Requires all seven classical grahas in the chart.
    pub fn from_chart(chart: &NatalChart) -> Result<Self, TrayiError> {
        let input = chart.ashtakavarga_input().ok_or_else(|| {
            TrayiError::Chart("ashtakavarga needs all seven classical grahas".into())
        })?;
        Ok(Self {
            result: calculate_ashtakavarga(&input),
        })
    }

    pub fn result(&self) -> &AshtakavargaResult {
        &self.result
    }
}

impl BinduTable for NatalBindus {
    fn name(&self) -> &'static str {
        "natal-bindus"
    }

    fn bindus(&self, graha: Graha, rashi: Rashi) -> Result<u8, ProviderError> {
        Ok(self.result.bav(graha).map_or(0, |b| b.points_in(rashi)))
    }

    fn combined_bindus(&self, rashi: Rashi) -> Result<u8, ProviderError> {
        Ok(self.result.sav.points_in(rashi))
    }

    fn contributes(&self, target: Graha, contributor: Contributor, rashi: Rashi) -> Option<bool> {
        self.result
            .prastara(target)
            .map(|p| p.has_bindu(contributor, rashi))
    }

    fn sodhana_totals(&self) -> Option<[u8; 12]> {
        Some(self.result.sav.after_ekadhipatya)
    }
}
