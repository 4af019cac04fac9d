//! Result types for the pillar synthesizer.

use chrono::{DateTime, Utc};
use dhruv_vedic_base::{DashaLevel, Graha};
use serde::{Deserialize, Serialize};

use crate::chart::PositionSnapshot;
use crate::config::ALIGNMENT_THRESHOLD;
use crate::dasha_types::LordStrength;
use crate::providers::{BinduTable, RulingLords};
use crate::score::PillarScore;
use crate::transit_types::TransitHighlight;

/// Agreement among the three pillar scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignmentState {
    AllFavorable,
    TwoFavorable,
    /// Exactly one pillar favorable.
    OneFavorable,
    AllUnfavorable,
}

impl AlignmentState {
    /// Classify from the three pillar scores against the fixed threshold.
    pub fn from_scores(dasha: f64, transit: f64, ashtakavarga: f64) -> Self {
        let favorable = [dasha, transit, ashtakavarga]
            .into_iter()
            .filter(|&s| s >= ALIGNMENT_THRESHOLD)
            .count();
        match favorable {
            3 => Self::AllFavorable,
            2 => Self::TwoFavorable,
            1 => Self::OneFavorable,
            _ => Self::AllUnfavorable,
        }
    }

    pub const fn bonus(self) -> f64 {
        match self {
            Self::AllFavorable => 10.0,
            Self::AllUnfavorable => -10.0,
            Self::TwoFavorable | Self::OneFavorable => 0.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::AllFavorable => "All favorable",
            Self::TwoFavorable => "Two favorable",
            Self::OneFavorable => "Mixed",
            Self::AllUnfavorable => "All unfavorable",
        }
    }
}

/// Six-level rating of a synthesized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbabilityRating {
    Peak,
    High,
    Moderate,
    Low,
    Challenging,
    Critical,
}

impl ProbabilityRating {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Self::Peak,
            s if s >= 65.0 => Self::High,
            s if s >= 50.0 => Self::Moderate,
            s if s >= 35.0 => Self::Low,
            s if s >= 20.0 => Self::Challenging,
            _ => Self::Critical,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Peak => "Peak",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::Challenging => "Challenging",
            Self::Critical => "Critical",
        }
    }
}

/// The three pillar scores of one body combined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetSynthesis {
    pub graha: Graha,
    /// Dasha level the body rules, if any.
    pub level: Option<DashaLevel>,
    /// `None` when the body rules no active period.
    pub dasha: Option<f64>,
    pub transit: f64,
    /// `None` for the nodes and bodies without a transit position.
    pub ashtakavarga: Option<f64>,
    pub alignment: AlignmentState,
    pub score: f64,
}

/// An active period lord as seen by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveLord {
    pub graha: Graha,
    pub level: DashaLevel,
    pub score: f64,
    pub strength: LordStrength,
    pub yogakaraka: bool,
}

/// Synthesized view of one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedPoint {
    pub instant: DateTime<Utc>,
    pub bodies: Vec<PlanetSynthesis>,
    /// In [0, 100].
    pub score: f64,
    pub rating: ProbabilityRating,
    /// From the three instant-level pillar scores.
    pub alignment: AlignmentState,
    /// Dasha-transit resonance included in `score`.
    pub resonance: f64,
    pub peak_planets: Vec<Graha>,
    pub challenging_planets: Vec<Graha>,
    pub dasha: PillarScore,
    pub transit: PillarScore,
    pub ashtakavarga: PillarScore,
    pub lords: Vec<ActiveLord>,
    pub highlights: Vec<TransitHighlight>,
}

impl SynthesizedPoint {
    pub fn body(&self, graha: Graha) -> Option<&PlanetSynthesis> {
        self.bodies.iter().find(|b| b.graha == graha)
    }
}

/// Everything the pillars need at one instant.
#[derive(Clone, Copy)]
pub struct InstantInputs<'a> {
    pub snapshot: &'a PositionSnapshot,
    pub lords: &'a RulingLords,
    pub bindus: &'a dyn BinduTable,
}

impl<'a> InstantInputs<'a> {
    pub fn new(
        snapshot: &'a PositionSnapshot,
        lords: &'a RulingLords,
        bindus: &'a dyn BinduTable,
    ) -> Self {
        Self {
            snapshot,
            lords,
            bindus,
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.snapshot.instant
    }
}
