//! Rashi (zodiac sign) identification and DMS formatting.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each.
//! Given a sidereal longitude, we identify which rashi the point falls in
//! and express the position as degrees-minutes-seconds within that sign.
//!
//! Clean-room implementation from universal Vedic convention:
//! 12 rashis of 30 deg each, starting from Mesha (Aries) at 0 deg.

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

/// Rashi element (tattva). Drives the navamsa starting sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RashiElement {
    Fire,
    Earth,
    Air,
    Water,
}

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi from a 0-based index, wrapping modulo 12.
    pub const fn from_index_wrapping(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    /// Rashi containing a sidereal longitude (any real value, normalized first).
    pub fn from_longitude(sidereal_lon: f64) -> Self {
        Self::from_index_wrapping(rashi_index_from_longitude(sidereal_lon))
    }

    /// Element of the rashi: Mesha fire, Vrishabha earth, Mithuna air, Karka water, repeating.
    pub const fn element(self) -> RashiElement {
        match self.index() % 4 {
            0 => RashiElement::Fire,
            1 => RashiElement::Earth,
            2 => RashiElement::Air,
            _ => RashiElement::Water,
        }
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    /// Whole degrees (0..29 within a rashi, or 0..359 standalone).
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include fractional part.
    pub seconds: f64,
}

/// Full rashi position result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RashiInfo {
    pub rashi: Rashi,
    /// Position within the rashi as DMS.
    pub dms: Dms,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// 0-based rashi index for a sidereal longitude.
pub fn rashi_index_from_longitude(sidereal_lon: f64) -> u8 {
    ((normalize_360(sidereal_lon) / 30.0).floor() as u8).min(11)
}

/// Rashi and in-sign position for a sidereal longitude.
pub fn rashi_from_longitude(sidereal_lon: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon);
    let idx = rashi_index_from_longitude(lon);
    let degrees_in_rashi = lon - idx as f64 * 30.0;
    RashiInfo {
        rashi: ALL_RASHIS[idx as usize],
        dms: deg_to_dms(degrees_in_rashi),
        degrees_in_rashi,
    }
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Handles negative input by taking absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let total_degrees = d.floor() as u16;
    let remainder = (d - total_degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees: total_degrees,
        minutes,
        seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_round_trip_through_table() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(Rashi::from_index_wrapping(i as u8), *r);
        }
        assert_eq!(Rashi::from_index_wrapping(12), Rashi::Mesha);
    }

    #[test]
    fn longitude_boundaries() {
        assert_eq!(Rashi::from_longitude(0.0), Rashi::Mesha);
        assert_eq!(Rashi::from_longitude(29.999), Rashi::Mesha);
        assert_eq!(Rashi::from_longitude(30.0), Rashi::Vrishabha);
        assert_eq!(Rashi::from_longitude(359.99), Rashi::Meena);
        assert_eq!(Rashi::from_longitude(-1.0), Rashi::Meena);
        assert_eq!(Rashi::from_longitude(725.0), Rashi::Mesha);
    }

    #[test]
    fn degrees_in_rashi_and_dms() {
        let info = rashi_from_longitude(95.5);
        assert_eq!(info.rashi, Rashi::Karka);
        assert!((info.degrees_in_rashi - 5.5).abs() < 1e-12);
        assert_eq!(info.dms.degrees, 5);
        assert_eq!(info.dms.minutes, 30);
        assert!(info.dms.seconds.abs() < 1e-6);
    }

    #[test]
    fn elements_cycle_every_four_signs() {
        assert_eq!(Rashi::Mesha.element(), RashiElement::Fire);
        assert_eq!(Rashi::Simha.element(), RashiElement::Fire);
        assert_eq!(Rashi::Makara.element(), RashiElement::Earth);
        assert_eq!(Rashi::Kumbha.element(), RashiElement::Air);
        assert_eq!(Rashi::Meena.element(), RashiElement::Water);
    }
}
