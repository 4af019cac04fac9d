//! Navamsha (D9) division and vargottama detection.
//!
//! Each rashi is split into 9 padas of 3°20'. The first pada maps to a
//! starting sign fixed by the rashi's element (fire from Mesha, earth from
//! Makara, air from Tula, water from Karka) and subsequent padas follow in
//! zodiacal order. A graha is vargottama when its D1 and D9 signs agree.
//!
//! Clean-room implementation from BPHS.

use crate::rashi::{Rashi, RashiElement, rashi_from_longitude};

const NAVAMSHA_SPAN: f64 = 30.0 / 9.0;

const fn navamsha_start(element: RashiElement) -> u8 {
    match element {
        RashiElement::Fire => 0,
        RashiElement::Earth => 9,
        RashiElement::Air => 6,
        RashiElement::Water => 3,
    }
}

/// Pada (0..=8) of a longitude within its rashi.
pub fn navamsha_pada(sidereal_lon: f64) -> u8 {
    let info = rashi_from_longitude(sidereal_lon);
    ((info.degrees_in_rashi / NAVAMSHA_SPAN).floor() as u8).min(8)
}

/// The D9 rashi for a sidereal longitude.
pub fn navamsha_rashi(sidereal_lon: f64) -> Rashi {
    let info = rashi_from_longitude(sidereal_lon);
    Rashi::from_index_wrapping(navamsha_start(info.rashi.element()) + navamsha_pada(sidereal_lon))
}

/// Same rashi in D1 and D9.
pub fn is_vargottama(sidereal_lon: f64) -> bool {
    Rashi::from_longitude(sidereal_lon) == navamsha_rashi(sidereal_lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_sign_starts_from_mesha() {
        // Mesha 5°: second pada
        assert_eq!(navamsha_pada(5.0), 1);
        assert_eq!(navamsha_rashi(5.0), Rashi::Vrishabha);
    }

    #[test]
    fn earth_sign_starts_from_makara() {
        // Vrishabha 15.5°: fifth pada, Makara + 4 = Vrishabha
        assert_eq!(navamsha_pada(45.5), 4);
        assert_eq!(navamsha_rashi(45.5), Rashi::Vrishabha);
    }

    #[test]
    fn air_and_water_starts() {
        assert_eq!(navamsha_rashi(60.0), Rashi::Tula);
        assert_eq!(navamsha_rashi(90.0), Rashi::Karka);
        // Jupiter at 5° Karka falls in the Simha navamsha
        assert_eq!(navamsha_rashi(95.0), Rashi::Simha);
    }

    #[test]
    fn last_pada_is_eight() {
        assert_eq!(navamsha_pada(29.999), 8);
        assert_eq!(navamsha_rashi(29.999), Rashi::Dhanu);
    }

    #[test]
    fn vargottama_positions() {
        // Mesha first pada, Vrishabha fifth pada, Mithuna ninth pada
        assert!(is_vargottama(1.0));
        assert!(is_vargottama(45.0));
        assert!(is_vargottama(88.0));
        // Karka first pada
        assert!(is_vargottama(91.0));
        assert!(!is_vargottama(95.0));
    }
}
