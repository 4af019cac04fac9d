//! Error types for the synthesis engine.

use chrono::{DateTime, Utc};
use dhruv_vedic_base::VedicError;
use thiserror::Error;

/// Rejected configuration values. Raised only at construction.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("pillar weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },
    #[error("{pillar} weight must lie in [0, 1], got {value}")]
    WeightRange { pillar: &'static str, value: f64 },
    #[error("thresholds need 0 <= critical < peak <= 100 (critical {critical}, peak {peak})")]
    Thresholds { critical: f64, peak: f64 },
    #[error("sampling interval of {seconds}s outside [1h, 30d]")]
    SamplingInterval { seconds: i64 },
    #[error("sub-period depth {0} outside 1..=3")]
    SubPeriodDepth(u8),
    #[error("minimum window duration must not be negative")]
    NegativeWindowDuration,
    #[error("{field} must be a whole number of seconds")]
    FractionalSeconds { field: &'static str },
    #[error("malformed config: {0}")]
    Parse(String),
}

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TrayiError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid chart: {0}")]
    Chart(String),
    #[error(transparent)]
    Vedic(#[from] VedicError),
    #[error("{provider} provider failed: {source}")]
    Provider {
        provider: &'static str,
        #[source]
        source: ProviderError,
    },
    #[error("invalid time range: {start} is not before {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("timeline would need {requested} samples, limit is {max}")]
    TooManySamples { requested: usize, max: usize },
}

impl TrayiError {
    /// Wrap a collaborator failure with the collaborator's name.
    pub fn provider(provider: &'static str, source: ProviderError) -> Self {
        Self::Provider { provider, source }
    }
}
