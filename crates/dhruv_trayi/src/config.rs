//! Validated synthesis configuration.
//!
//! A [`SynthesisConfig`] can only be obtained through
//! [`SynthesisConfigBuilder::build`] or from a [`RawConfig`], both of which
//! reject invalid values. Once built it is immutable.

use chrono::TimeDelta;
use dhruv_vedic_base::MAX_DASHA_DEPTH;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::score::Pillar;

/// Fixed alignment threshold: a pillar at or above this counts as favorable.
pub const ALIGNMENT_THRESHOLD: f64 = 55.0;

/// Tolerance on the pillar weight sum.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

pub const DEFAULT_PEAK_THRESHOLD: f64 = 65.0;
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 35.0;

const MIN_SAMPLING_SECS: i64 = 3_600;
const MAX_SAMPLING_SECS: i64 = 30 * 86_400;

// ---------------------------------------------------------------------------
// Pillar weights
// ---------------------------------------------------------------------------

/// Relative weight of each pillar. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights {
    pub dasha: f64,
    pub transit: f64,
    pub ashtakavarga: f64,
}

impl PillarWeights {
    pub const BALANCED: Self = Self::new(0.35, 0.35, 0.30);
    pub const DASHA_FOCUSED: Self = Self::new(0.50, 0.30, 0.20);
    pub const TRANSIT_FOCUSED: Self = Self::new(0.25, 0.45, 0.30);
    pub const BINDU_FOCUSED: Self = Self::new(0.30, 0.30, 0.40);

    pub const fn new(dasha: f64, transit: f64, ashtakavarga: f64) -> Self {
        Self {
            dasha,
            transit,
            ashtakavarga,
        }
    }

    pub const fn get(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Dasha => self.dasha,
            Pillar::Transit => self.transit,
            Pillar::Ashtakavarga => self.ashtakavarga,
        }
    }

    /// Named preset lookup (`balanced`, `dasha`, `transit`, `bindu`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "balanced" => Some(Self::BALANCED),
            "dasha" | "dasha_focused" => Some(Self::DASHA_FOCUSED),
            "transit" | "transit_focused" => Some(Self::TRANSIT_FOCUSED),
            "bindu" | "bindu_focused" => Some(Self::BINDU_FOCUSED),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for pillar in crate::score::ALL_PILLARS {
            let value = self.get(pillar);
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WeightRange {
                    pillar: pillar.name(),
                    value,
                });
            }
        }
        let sum = self.dasha + self.transit + self.ashtakavarga;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(())
    }
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self::BALANCED
    }
}

// ---------------------------------------------------------------------------
// Sampling and toggles
// ---------------------------------------------------------------------------

/// Timeline sampling granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// Interval chosen from the range length.
    #[default]
    Adaptive,
    /// Fixed interval within [1 h, 30 d].
    Fixed(TimeDelta),
}

/// Optional scoring adjustments. All on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub retrograde_adjustment: bool,
    pub vedha_correction: bool,
    pub combustion_adjustment: bool,
    pub dasha_transit_resonance: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            retrograde_adjustment: true,
            vedha_correction: true,
            combustion_adjustment: true,
            dasha_transit_resonance: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SynthesisConfig
// ---------------------------------------------------------------------------

/// Immutable, validated engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    weights: PillarWeights,
    peak_threshold: f64,
    critical_threshold: f64,
    sampling: Sampling,
    toggles: FeatureToggles,
    sub_period_depth: u8,
    min_window_duration: TimeDelta,
}

impl SynthesisConfig {
    pub fn builder() -> SynthesisConfigBuilder {
        SynthesisConfigBuilder::default()
    }

    /// Parse and validate a JSON document shaped like [`RawConfig`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::try_from(raw)
    }

    pub fn weights(&self) -> PillarWeights {
        self.weights
    }

    pub fn peak_threshold(&self) -> f64 {
        self.peak_threshold
    }

    pub fn critical_threshold(&self) -> f64 {
        self.critical_threshold
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    pub fn toggles(&self) -> FeatureToggles {
        self.toggles
    }

    /// Number of dasha levels considered (1 = Mahadasha only).
    pub fn sub_period_depth(&self) -> u8 {
        self.sub_period_depth
    }

    pub fn min_window_duration(&self) -> TimeDelta {
        self.min_window_duration
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            weights: PillarWeights::BALANCED,
            peak_threshold: DEFAULT_PEAK_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            sampling: Sampling::Adaptive,
            toggles: FeatureToggles::default(),
            sub_period_depth: MAX_DASHA_DEPTH,
            min_window_duration: TimeDelta::zero(),
        }
    }
}

/// Builder for [`SynthesisConfig`]. Starts from the defaults.
#[derive(Debug, Clone, Default)]
pub struct SynthesisConfigBuilder {
    inner: SynthesisConfig,
}

impl SynthesisConfigBuilder {
    pub fn weights(mut self, weights: PillarWeights) -> Self {
        self.inner.weights = weights;
        self
    }

    pub fn peak_threshold(mut self, value: f64) -> Self {
        self.inner.peak_threshold = value;
        self
    }

    pub fn critical_threshold(mut self, value: f64) -> Self {
        self.inner.critical_threshold = value;
        self
    }

    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.inner.sampling = sampling;
        self
    }

    pub fn toggles(mut self, toggles: FeatureToggles) -> Self {
        self.inner.toggles = toggles;
        self
    }

    pub fn retrograde_adjustment(mut self, on: bool) -> Self {
        self.inner.toggles.retrograde_adjustment = on;
        self
    }

    pub fn vedha_correction(mut self, on: bool) -> Self {
        self.inner.toggles.vedha_correction = on;
        self
    }

    pub fn combustion_adjustment(mut self, on: bool) -> Self {
        self.inner.toggles.combustion_adjustment = on;
        self
    }

    pub fn dasha_transit_resonance(mut self, on: bool) -> Self {
        self.inner.toggles.dasha_transit_resonance = on;
        self
    }

    pub fn sub_period_depth(mut self, depth: u8) -> Self {
        self.inner.sub_period_depth = depth;
        self
    }

    pub fn min_window_duration(mut self, duration: TimeDelta) -> Self {
        self.inner.min_window_duration = duration;
        self
    }

    pub fn build(self) -> Result<SynthesisConfig, ConfigError> {
        let c = self.inner;
        c.weights.validate()?;

        let thresholds_ok = c.critical_threshold >= 0.0
            && c.critical_threshold < c.peak_threshold
            && c.peak_threshold <= 100.0;
        if !thresholds_ok {
            return Err(ConfigError::Thresholds {
                critical: c.critical_threshold,
                peak: c.peak_threshold,
            });
        }

        if let Sampling::Fixed(interval) = c.sampling {
            let seconds = interval.num_seconds();
            if !(MIN_SAMPLING_SECS..=MAX_SAMPLING_SECS).contains(&seconds) {
                return Err(ConfigError::SamplingInterval { seconds });
            }
            if interval.subsec_nanos() != 0 {
                return Err(ConfigError::FractionalSeconds {
                    field: "sampling interval",
                });
            }
        }

        if !(1..=MAX_DASHA_DEPTH).contains(&c.sub_period_depth) {
            return Err(ConfigError::SubPeriodDepth(c.sub_period_depth));
        }

        if c.min_window_duration < TimeDelta::zero() {
            return Err(ConfigError::NegativeWindowDuration);
        }
        if c.min_window_duration.subsec_nanos() != 0 {
            return Err(ConfigError::FractionalSeconds {
                field: "minimum window duration",
            });
        }

        Ok(c)
    }
}

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

/// Unvalidated, serializable configuration.
///
/// Missing fields take the defaults. Convert with `SynthesisConfig::try_from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub weights: PillarWeights,
    pub peak_threshold: f64,
    pub critical_threshold: f64,
    /// Fixed sampling interval in seconds; adaptive when absent.
    pub sampling_secs: Option<i64>,
    pub toggles: FeatureToggles,
    pub sub_period_depth: u8,
    pub min_window_secs: i64,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self::from(&SynthesisConfig::default())
    }
}

impl TryFrom<RawConfig> for SynthesisConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let sampling = match raw.sampling_secs {
            Some(secs) => Sampling::Fixed(
                TimeDelta::try_seconds(secs)
                    .ok_or(ConfigError::SamplingInterval { seconds: secs })?,
            ),
            None => Sampling::Adaptive,
        };
        let min_window = TimeDelta::try_seconds(raw.min_window_secs)
            .ok_or(ConfigError::NegativeWindowDuration)?;
        SynthesisConfig::builder()
            .weights(raw.weights)
            .peak_threshold(raw.peak_threshold)
            .critical_threshold(raw.critical_threshold)
            .sampling(sampling)
            .toggles(raw.toggles)
            .sub_period_depth(raw.sub_period_depth)
            .min_window_duration(min_window)
            .build()
    }
}

impl From<&SynthesisConfig> for RawConfig {
    fn from(c: &SynthesisConfig) -> Self {
        let sampling_secs = match c.sampling {
            Sampling::Fixed(d) => Some(d.num_seconds()),
            Sampling::Adaptive => None,
        };
        Self {
            weights: c.weights,
            peak_threshold: c.peak_threshold,
            critical_threshold: c.critical_threshold,
            sampling_secs,
            toggles: c.toggles,
            sub_period_depth: c.sub_period_depth,
            min_window_secs: c.min_window_duration.num_seconds(),
        }
    }
}
