//! Result types for the Ashtakavarga pillar.

use dhruv_vedic_base::{Graha, Kaksha, Rashi};
use serde::{Deserialize, Serialize};

use crate::score::PillarScore;

/// Combined-bindu threshold of a strong sign.
pub const STRONG_SIGN_BINDUS: u8 = 28;
/// Combined bindus below this make a weak sign.
pub const WEAK_SIGN_BINDUS: u8 = 22;

/// Six-tier reading of own and combined bindus in a transit sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinduQuality {
    Excellent,
    Good,
    Average,
    BelowAverage,
    Challenging,
    Difficult,
}

impl BinduQuality {
    pub const fn classify(bav: u8, sav: u8) -> Self {
        if bav >= 5 && sav >= 30 {
            Self::Excellent
        } else if bav >= 4 && sav >= 28 {
            Self::Good
        } else if bav >= 3 && sav >= 25 {
            Self::Average
        } else if bav >= 2 && sav >= 22 {
            Self::BelowAverage
        } else if bav >= 2 || sav >= 25 {
            Self::Challenging
        } else {
            Self::Difficult
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::BelowAverage => "Below average",
            Self::Challenging => "Challenging",
            Self::Difficult => "Difficult",
        }
    }
}

/// Where the kaksha verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KakshaSource {
    /// The kaksha lord's cell in the body's prastara.
    Prastara,
    /// Combined bindus of the sign, when the table has no prastara.
    SavFallback,
}

/// One body's bindu support in its transit sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinduBodyScore {
    pub graha: Graha,
    pub rashi: Rashi,
    pub bav: u8,
    pub sav: u8,
    pub quality: BinduQuality,
    pub kaksha: Kaksha,
    pub kaksha_favorable: bool,
    pub kaksha_source: KakshaSource,
    pub score: f64,
}

/// Combined bindus summed over the four purushartha groups, counted as
/// houses from the lagna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PurusharthaTotals {
    /// Houses 1, 5, 9.
    pub dharma: u16,
    /// Houses 2, 6, 10.
    pub artha: u16,
    /// Houses 3, 7, 11.
    pub kama: u16,
    /// Houses 4, 8, 12.
    pub moksha: u16,
}

/// Reporting view of the combined bindus across the zodiac.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavDistribution {
    pub total: u16,
    pub average: f64,
    pub strongest: Rashi,
    pub weakest: Rashi,
    /// Combined bindus of at least 28.
    pub strong_signs: Vec<Rashi>,
    /// Combined bindus below 22.
    pub weak_signs: Vec<Rashi>,
    pub purusharthas: PurusharthaTotals,
    /// After Trikona and Ekadhipatya Sodhana, when the table provides it.
    pub sodhana_totals: Option<[u8; 12]>,
}

/// Complete Ashtakavarga pillar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AshtakavargaAnalysis {
    /// Every body present in the snapshot. Nodes are listed at zero
    /// bindus and left out of the score.
    pub bodies: Vec<BinduBodyScore>,
    pub distribution: SavDistribution,
    pub score: PillarScore,
}

impl AshtakavargaAnalysis {
    pub fn body(&self, graha: Graha) -> Option<&BinduBodyScore> {
        self.bodies.iter().find(|b| b.graha == graha)
    }

    /// Per-body score. `None` for the nodes and for bodies without a
    /// transit position.
    pub fn body_score(&self, graha: Graha) -> Option<f64> {
        self.body(graha)
            .filter(|b| !b.graha.is_node())
            .map(|b| b.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_tiers() {
        assert_eq!(BinduQuality::classify(5, 30), BinduQuality::Excellent);
        assert_eq!(BinduQuality::classify(5, 29), BinduQuality::Good);
        assert_eq!(BinduQuality::classify(3, 25), BinduQuality::Average);
        assert_eq!(BinduQuality::classify(2, 22), BinduQuality::BelowAverage);
        assert_eq!(BinduQuality::classify(2, 10), BinduQuality::Challenging);
        assert_eq!(BinduQuality::classify(0, 25), BinduQuality::Challenging);
        assert_eq!(BinduQuality::classify(1, 24), BinduQuality::Difficult);
        assert_eq!(BinduQuality::classify(0, 17), BinduQuality::Difficult);
    }
}
