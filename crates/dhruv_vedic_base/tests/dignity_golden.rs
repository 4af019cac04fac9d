//! Golden dignity, aspect and house readings for a fixed Scorpio-lagna chart.

use dhruv_vedic_base::{
    AngularAspect, Bhava, Dignity, Graha, Rashi, angular_aspect, aspects_rashi, dignity_in_rashi,
    houses_ruled_by, is_combust, is_vargottama, navamsha_rashi, yogakaraka,
};

const LAGNA: Rashi = Rashi::Vrischika;

#[test]
fn jupiter_exalted_in_ninth() {
    let lon = 95.0;
    assert_eq!(dignity_in_rashi(Graha::Guru, lon), Dignity::Exalted);
    let house = Bhava::of_rashi(LAGNA, Rashi::from_longitude(lon));
    assert_eq!(house.number(), 9);
    assert!(house.is_trikona());
}

#[test]
fn scorpio_lordships_and_yogakaraka() {
    let moon: Vec<u8> = houses_ruled_by(Graha::Chandra, LAGNA)
        .into_iter()
        .map(Bhava::number)
        .collect();
    assert_eq!(moon, vec![9]);
    assert_eq!(yogakaraka(LAGNA), Some(Graha::Chandra));
}

#[test]
fn saturn_aspects_from_capricorn() {
    // 3rd Pisces, 7th Cancer, 10th Libra
    assert!(aspects_rashi(Graha::Shani, Rashi::Makara, Rashi::Meena));
    assert!(aspects_rashi(Graha::Shani, Rashi::Makara, Rashi::Karka));
    assert!(aspects_rashi(Graha::Shani, Rashi::Makara, Rashi::Tula));
    assert!(!aspects_rashi(Graha::Shani, Rashi::Makara, Rashi::Vrishabha));
}

#[test]
fn transit_over_natal_point() {
    let m = angular_aspect(200.0, 21.5, 8.0);
    assert_eq!(m.map(|m| m.aspect), Some(AngularAspect::Opposition));
    assert!((m.map_or(f64::NAN, |m| m.orb) - 1.5).abs() < 1e-9);
}

#[test]
fn navamsha_and_combustion_readings() {
    assert!(is_vargottama(91.0));
    assert_eq!(navamsha_rashi(60.0), Rashi::Tula);
    assert!(is_combust(Graha::Shukra, 109.0, 100.0, false));
    assert!(!is_combust(Graha::Shukra, 109.0, 100.0, true));
}
