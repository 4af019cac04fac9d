//! Graha drishti (planetary aspect) in two readings.
//!
//! Whole-sign drishti: every graha aspects the 7th sign from itself, Mars
//! also the 4th/8th, Jupiter the 5th/9th, Saturn the 3rd/10th, and the
//! nodes the 5th/9th. Angular aspects: conjunction, opposition, trine and
//! square measured on the ecliptic within an orb.
//!
//! Clean-room implementation from standard Vedic jyotish texts (BPHS).

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::rashi::Rashi;
use crate::util::angular_separation;

// ---------------------------------------------------------------------------
// Whole-sign drishti
// ---------------------------------------------------------------------------

/// Houses (counted inclusively from the graha's sign) a graha aspects.
pub const fn aspected_houses(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Mangal => &[4, 7, 8],
        Graha::Guru => &[5, 7, 9],
        Graha::Shani => &[3, 7, 10],
        Graha::Rahu | Graha::Ketu => &[5, 7, 9],
        Graha::Surya | Graha::Chandra | Graha::Buddh | Graha::Shukra => &[7],
    }
}

/// House count from `from` to `to`, inclusive (same sign = 1).
pub const fn house_distance(from: Rashi, to: Rashi) -> u8 {
    (to.index() + 12 - from.index()) % 12 + 1
}

/// Whether a graha sitting in `from` casts whole-sign drishti on `target`.
pub fn aspects_rashi(graha: Graha, from: Rashi, target: Rashi) -> bool {
    aspected_houses(graha).contains(&house_distance(from, target))
}

/// Whether the two grahas aspect each other by whole-sign drishti.
pub fn mutual_aspect(a: Graha, a_rashi: Rashi, b: Graha, b_rashi: Rashi) -> bool {
    aspects_rashi(a, a_rashi, b_rashi) && aspects_rashi(b, b_rashi, a_rashi)
}

// ---------------------------------------------------------------------------
// Angular aspects
// ---------------------------------------------------------------------------

/// Major angular aspect between two longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngularAspect {
    Conjunction,
    Opposition,
    Trine,
    Square,
}

pub const ALL_ANGULAR_ASPECTS: [AngularAspect; 4] = [
    AngularAspect::Conjunction,
    AngularAspect::Opposition,
    AngularAspect::Trine,
    AngularAspect::Square,
];

impl AngularAspect {
    /// Exact separation in degrees.
    pub const fn exact_angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Opposition => 180.0,
            Self::Trine => 120.0,
            Self::Square => 90.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Opposition => "opposition",
            Self::Trine => "trine",
            Self::Square => "square",
        }
    }
}

/// Matched angular aspect with its orb (distance from exact, degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub aspect: AngularAspect,
    pub orb: f64,
}

/// The tightest major aspect between two longitudes within `max_orb`.
pub fn angular_aspect(lon_a: f64, lon_b: f64, max_orb: f64) -> Option<AspectMatch> {
    let sep = angular_separation(lon_a, lon_b);
    ALL_ANGULAR_ASPECTS
        .iter()
        .map(|&aspect| AspectMatch {
            aspect,
            orb: (sep - aspect.exact_angle()).abs(),
        })
        .filter(|m| m.orb <= max_orb)
        .min_by(|a, b| a.orb.total_cmp(&b.orb))
}
