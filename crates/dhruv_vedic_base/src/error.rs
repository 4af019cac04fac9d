//! Error types for Vedic base calculations.

use thiserror::Error;

/// Errors from Vedic base lookups.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// A house number outside 1..=12.
    #[error("invalid house number {0}, expected 1..=12")]
    InvalidHouse(u8),
    /// A longitude that is NaN or infinite.
    #[error("non-finite longitude")]
    NonFiniteLongitude,
    /// A name that matches no known graha.
    #[error("unknown graha name: {0}")]
    UnknownGraha(String),
}
