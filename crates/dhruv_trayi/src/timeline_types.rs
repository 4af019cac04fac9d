//! Result types for timeline generation.

use chrono::{DateTime, Utc, Weekday};
use dhruv_vedic_base::Graha;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::life_area::LifeArea;
use crate::synthesis_types::SynthesizedPoint;

/// One scored instant, as seen by the run detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub instant: DateTime<Utc>,
    pub score: f64,
}

/// Which side of a threshold a run lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunKind {
    /// At or above the threshold.
    Peak,
    /// At or below the threshold.
    Critical,
}

impl RunKind {
    pub fn admits(self, score: f64, threshold: f64) -> bool {
        match self {
            Self::Peak => score >= threshold,
            Self::Critical => score <= threshold,
        }
    }

    /// Whether `candidate` is more extreme than `current` for this kind.
    pub fn beats(self, candidate: f64, current: f64) -> bool {
        match self {
            Self::Peak => candidate > current,
            Self::Critical => candidate < current,
        }
    }
}

/// A maximal run of samples past a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Index of the first member in the timeline.
    pub first: usize,
    /// Index of the last member, inclusive.
    pub last: usize,
    /// Max for peaks, min for critical periods. First occurrence wins.
    pub extremum_at: DateTime<Utc>,
    pub extremum: f64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub span: WindowSpan,
    /// Most frequent peak planets across the run.
    pub dominant_planets: Vec<Graha>,
    pub supporting_factors: Vec<String>,
    pub suggested_areas: Vec<LifeArea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPeriod {
    pub span: WindowSpan,
    /// Most frequent challenging planets across the run.
    pub challenging_planets: Vec<Graha>,
    pub challenges: Vec<String>,
    pub mitigations: Vec<String>,
    /// At most five, specific ones first.
    pub remedies: Vec<String>,
    /// Areas whose primary significators rule no period of moderate strength.
    pub avoid: Vec<LifeArea>,
}

/// Direction of the score over the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    StronglyImproving,
    Improving,
    StablePositive,
    StableNeutral,
    StableNegative,
    Declining,
    StronglyDeclining,
    Volatile,
}

impl Trend {
    pub const fn name(self) -> &'static str {
        match self {
            Self::StronglyImproving => "Strongly improving",
            Self::Improving => "Improving",
            Self::StablePositive => "Stable (positive)",
            Self::StableNeutral => "Stable (neutral)",
            Self::StableNegative => "Stable (negative)",
            Self::Declining => "Declining",
            Self::StronglyDeclining => "Strongly declining",
            Self::Volatile => "Volatile",
        }
    }

    pub const fn is_stable(self) -> bool {
        matches!(
            self,
            Self::StablePositive | Self::StableNeutral | Self::StableNegative
        )
    }
}

/// Overall quality of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineQuality {
    VeryFavorable,
    Favorable,
    Mixed,
    Challenging,
    VeryChallenging,
}

impl TimelineQuality {
    pub const fn name(self) -> &'static str {
        match self {
            Self::VeryFavorable => "Very favorable",
            Self::Favorable => "Favorable",
            Self::Mixed => "Mixed",
            Self::Challenging => "Challenging",
            Self::VeryChallenging => "Very challenging",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStatistics {
    pub average: f64,
    /// Standard deviation of the scores.
    pub volatility: f64,
    pub best: Sample,
    pub worst: Sample,
    /// Weekday with the highest mean score.
    pub best_weekday: Weekday,
    pub quality: TimelineQuality,
}

/// Sampled synthesis over a date range with its derived windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval_secs: i64,
    pub points: Vec<SynthesizedPoint>,
    pub peak_windows: Vec<PeakWindow>,
    pub critical_periods: Vec<CriticalPeriod>,
    pub trend: Trend,
    pub statistics: TimelineStatistics,
    /// Mean score per calendar month, keyed `YYYY-MM`, in time order.
    pub monthly_averages: IndexMap<String, f64>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

impl Timeline {
    /// Members of a window.
    pub fn window_points(&self, span: &WindowSpan) -> &[SynthesizedPoint] {
        self.points.get(span.first..=span.last).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_kind_thresholds_are_inclusive() {
        assert!(RunKind::Peak.admits(65.0, 65.0));
        assert!(!RunKind::Peak.admits(64.9, 65.0));
        assert!(RunKind::Critical.admits(35.0, 35.0));
        assert!(!RunKind::Critical.admits(35.1, 35.0));
        assert!(RunKind::Critical.beats(10.0, 20.0));
        assert!(!RunKind::Peak.beats(20.0, 20.0));
    }

    #[test]
    fn stable_trends() {
        assert!(Trend::StableNegative.is_stable());
        assert!(!Trend::Volatile.is_stable());
    }
}
