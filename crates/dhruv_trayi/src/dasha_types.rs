//! Result types for the dasha pillar.

use dhruv_vedic_base::{Bhava, DashaLevel, Dignity, Graha, Rashi};
use serde::{Deserialize, Serialize};

use crate::score::{Factor, PillarScore};

/// Strength class of a single dasha lord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LordStrength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

impl LordStrength {
    /// VeryStrong needs a score of 80+, exaltation or own sign, and a
    /// kendra or trikona house.
    pub fn classify(score: f64, dignity: Dignity, house: Bhava) -> Self {
        let dignified = matches!(dignity, Dignity::Exalted | Dignity::OwnSign);
        let angular = house.is_kendra() || house.is_trikona();
        match score {
            s if s >= 80.0 && dignified && angular => Self::VeryStrong,
            s if s >= 65.0 => Self::Strong,
            s if s >= 45.0 => Self::Moderate,
            s if s >= 30.0 => Self::Weak,
            _ => Self::VeryWeak,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::VeryStrong => "Very strong",
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
            Self::VeryWeak => "Very weak",
        }
    }

    pub const fn is_weak(self) -> bool {
        matches!(self, Self::Weak | Self::VeryWeak)
    }
}

/// Point breakdown of a lord's base score, before clamping and the
/// yogakaraka multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LordPoints {
    pub dignity: f64,
    pub house: f64,
    pub lordship: f64,
    pub aspects: f64,
    pub special: f64,
}

impl LordPoints {
    pub fn total(&self) -> f64 {
        self.dignity + self.house + self.lordship + self.aspects + self.special
    }
}

/// Natal placement details of a lord present in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LordPlacement {
    pub rashi: Rashi,
    pub house: Bhava,
    pub dignity: Dignity,
}

/// Analysis of one active dasha lord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LordAnalysis {
    pub graha: Graha,
    pub level: DashaLevel,
    /// `None` when the lord is absent from the chart.
    pub placement: Option<LordPlacement>,
    pub ruled_houses: Vec<Bhava>,
    pub aspected_by: Vec<Graha>,
    /// Combustion, retrogression, war and vargottama adjustments.
    pub conditions: Vec<Factor>,
    pub points: LordPoints,
    pub yogakaraka: bool,
    pub score: f64,
    pub strength: LordStrength,
}

/// Qualitative reading of the combination modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinationSummary {
    HighlySupportive,
    Favorable,
    Neutral,
    Challenging,
    Difficult,
}

impl CombinationSummary {
    pub fn from_modifier(modifier: f64) -> Self {
        match modifier {
            m if m >= 1.20 => Self::HighlySupportive,
            m if m >= 1.10 => Self::Favorable,
            m if m >= 0.95 => Self::Neutral,
            m if m >= 0.85 => Self::Challenging,
            _ => Self::Difficult,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::HighlySupportive => "Highly supportive dasha combination",
            Self::Favorable => "Favorable dasha combination",
            Self::Neutral => "Neutral dasha combination",
            Self::Challenging => "Challenging dasha combination",
            Self::Difficult => "Difficult dasha combination",
        }
    }
}

/// Multiplicative interplay of the active lords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaCombination {
    pub modifier: f64,
    pub summary: CombinationSummary,
    pub notes: Vec<String>,
}

impl DashaCombination {
    pub fn single() -> Self {
        Self {
            modifier: 1.0,
            summary: CombinationSummary::Neutral,
            notes: vec!["Single dasha lord active".into()],
        }
    }
}

/// Complete dasha pillar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaAnalysis {
    /// Analyses of the lords within the configured depth, outermost first.
    pub lords: Vec<LordAnalysis>,
    /// `None` when no dasha is active.
    pub combination: Option<DashaCombination>,
    pub score: PillarScore,
}

impl DashaAnalysis {
    pub fn lord(&self, graha: Graha) -> Option<&LordAnalysis> {
        self.lords.iter().find(|l| l.graha == graha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(n: u8) -> Bhava {
        Bhava::new(n).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn very_strong_needs_all_three() {
        assert_eq!(
            LordStrength::classify(85.0, Dignity::Exalted, house(9)),
            LordStrength::VeryStrong
        );
        assert_eq!(
            LordStrength::classify(85.0, Dignity::Mitra, house(9)),
            LordStrength::Strong
        );
        assert_eq!(
            LordStrength::classify(85.0, Dignity::OwnSign, house(8)),
            LordStrength::Strong
        );
        assert_eq!(
            LordStrength::classify(29.0, Dignity::OwnSign, house(1)),
            LordStrength::VeryWeak
        );
    }

    #[test]
    fn combination_summary_edges() {
        assert_eq!(
            CombinationSummary::from_modifier(1.2),
            CombinationSummary::HighlySupportive
        );
        assert_eq!(CombinationSummary::from_modifier(1.0), CombinationSummary::Neutral);
        assert_eq!(
            CombinationSummary::from_modifier(0.85),
            CombinationSummary::Challenging
        );
        assert_eq!(CombinationSummary::from_modifier(0.8), CombinationSummary::Difficult);
    }

    #[test]
    fn points_total() {
        let p = LordPoints {
            dignity: 75.0,
            house: 20.0,
            lordship: 15.0,
            aspects: -5.0,
            special: 12.0,
        };
        assert!((p.total() - 117.0).abs() < 1e-12);
    }
}
