//! Combustion (Asta/Moudhya) detection for grahas.
//!
//! A graha is combust when it is too close to the Sun, with thresholds
//! varying by planet and retrograde status per BPHS.
//!
//! Clean-room implementation from BPHS combustion thresholds.

use crate::graha::Graha;
use crate::util::angular_separation;

/// BPHS combustion threshold (degrees from Sun) for a graha.
///
/// `None` for Sun, Rahu, and Ketu. Mercury and Venus are tighter when retrograde.
pub const fn combustion_threshold(graha: Graha, is_retrograde: bool) -> Option<f64> {
    match graha {
        Graha::Surya | Graha::Rahu | Graha::Ketu => None,
        Graha::Chandra => Some(12.0),
        Graha::Mangal => Some(17.0),
        Graha::Buddh if is_retrograde => Some(12.0),
        Graha::Buddh => Some(14.0),
        Graha::Guru => Some(11.0),
        Graha::Shukra if is_retrograde => Some(8.0),
        Graha::Shukra => Some(10.0),
        Graha::Shani => Some(15.0),
    }
}

/// Whether a graha is combust.
///
/// A graha at exactly the threshold distance is not combust (strict less-than).
pub fn is_combust(graha: Graha, graha_sid_lon: f64, sun_sid_lon: f64, is_retrograde: bool) -> bool {
    match combustion_threshold(graha, is_retrograde) {
        Some(t) => angular_separation(graha_sid_lon, sun_sid_lon) < t,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_threshold_for_sun_and_nodes() {
        assert!(combustion_threshold(Graha::Surya, false).is_none());
        assert!(combustion_threshold(Graha::Rahu, false).is_none());
        assert!(combustion_threshold(Graha::Ketu, true).is_none());
        assert!(!is_combust(Graha::Rahu, 100.0, 100.0, false));
    }

    #[test]
    fn retrograde_tightens_inner_planets_only() {
        assert_eq!(combustion_threshold(Graha::Buddh, false), Some(14.0));
        assert_eq!(combustion_threshold(Graha::Buddh, true), Some(12.0));
        assert_eq!(combustion_threshold(Graha::Shukra, false), Some(10.0));
        assert_eq!(combustion_threshold(Graha::Shukra, true), Some(8.0));
        assert_eq!(combustion_threshold(Graha::Mangal, true), Some(17.0));
    }

    #[test]
    fn boundary_is_strict() {
        assert!(!is_combust(Graha::Mangal, 117.0, 100.0, false));
        assert!(is_combust(Graha::Mangal, 116.999, 100.0, false));
    }

    #[test]
    fn wraps_across_zero_aries() {
        assert!(is_combust(Graha::Mangal, 5.0, 355.0, false));
    }

    #[test]
    fn retrograde_mercury_escapes_at_thirteen_degrees() {
        assert!(is_combust(Graha::Buddh, 113.0, 100.0, false));
        assert!(!is_combust(Graha::Buddh, 113.0, 100.0, true));
    }
}
