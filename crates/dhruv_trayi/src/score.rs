//! Pillar scores shared by every pillar and the synthesizer.

use serde::{Deserialize, Serialize};

/// Neutral value substituted for missing data.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Clamp into [0, 100]. NaN collapses to the neutral score.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL_SCORE
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// The three predictive pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pillar {
    Dasha,
    Transit,
    Ashtakavarga,
}

pub const ALL_PILLARS: [Pillar; 3] = [Pillar::Dasha, Pillar::Transit, Pillar::Ashtakavarga];

impl Pillar {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dasha => "Dasha",
            Self::Transit => "Transit",
            Self::Ashtakavarga => "Ashtakavarga",
        }
    }

    /// Case-insensitive lookup; `gochara` and `bindu` are accepted aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dasha" => Some(Self::Dasha),
            "transit" | "gochara" => Some(Self::Transit),
            "ashtakavarga" | "bindu" => Some(Self::Ashtakavarga),
            _ => None,
        }
    }
}

/// Five-level qualitative bucket of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreBucket {
    Excellent,
    Good,
    Moderate,
    Challenging,
    Difficult,
}

impl ScoreBucket {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 75.0 => Self::Excellent,
            s if s >= 60.0 => Self::Good,
            s if s >= 45.0 => Self::Moderate,
            s if s >= 30.0 => Self::Challenging,
            _ => Self::Difficult,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Challenging => "Challenging",
            Self::Difficult => "Difficult",
        }
    }
}

/// One labelled contribution to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub label: String,
    pub delta: f64,
}

impl Factor {
    pub fn new(label: impl Into<String>, delta: f64) -> Self {
        Self {
            label: label.into(),
            delta,
        }
    }
}

/// Normalized output of one pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    /// In [0, 100].
    pub value: f64,
    pub bucket: ScoreBucket,
    pub factors: Vec<Factor>,
    pub narrative: String,
}

impl PillarScore {
    /// Clamp the value and derive its bucket.
    pub fn new(
        pillar: Pillar,
        value: f64,
        factors: Vec<Factor>,
        narrative: impl Into<String>,
    ) -> Self {
        let value = clamp_score(value);
        Self {
            pillar,
            value,
            bucket: ScoreBucket::from_score(value),
            factors,
            narrative: narrative.into(),
        }
    }

    /// The neutral 50 with an explanation.
    pub fn neutral(pillar: Pillar, narrative: impl Into<String>) -> Self {
        Self::new(pillar, NEUTRAL_SCORE, Vec::new(), narrative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges() {
        assert_eq!(ScoreBucket::from_score(75.0), ScoreBucket::Excellent);
        assert_eq!(ScoreBucket::from_score(74.99), ScoreBucket::Good);
        assert_eq!(ScoreBucket::from_score(60.0), ScoreBucket::Good);
        assert_eq!(ScoreBucket::from_score(45.0), ScoreBucket::Moderate);
        assert_eq!(ScoreBucket::from_score(30.0), ScoreBucket::Challenging);
        assert_eq!(ScoreBucket::from_score(29.9), ScoreBucket::Difficult);
    }

    #[test]
    fn new_clamps_value() {
        let s = PillarScore::new(Pillar::Transit, 140.0, Vec::new(), "");
        assert!((s.value - 100.0).abs() < 1e-12);
        assert_eq!(s.bucket, ScoreBucket::Excellent);
        let s = PillarScore::new(Pillar::Transit, -3.0, Vec::new(), "");
        assert!(s.value.abs() < 1e-12);
        assert!((clamp_score(f64::NAN) - NEUTRAL_SCORE).abs() < 1e-12);
    }

    #[test]
    fn pillar_aliases() {
        assert_eq!(Pillar::from_name("Gochara"), Some(Pillar::Transit));
        assert_eq!(Pillar::from_name("bindu"), Some(Pillar::Ashtakavarga));
        assert_eq!(Pillar::from_name("yoga"), None);
    }
}
