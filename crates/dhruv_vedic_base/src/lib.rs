//! Leaf jyotish helpers shared by the synthesis engine.
//!
//! This crate provides:
//! - Graha and rashi enums with rashi lordship
//! - Naisargika dignity, natural friendship, benefic nature, yogakaraka
//! - Combustion thresholds
//! - Whole-sign drishti and angular aspects
//! - Navamsha and vargottama
//! - Whole-sign bhava groupings and lordship
//! - Ashtakavarga (prastara, BAV, SAV, sodhana, kaksha)
//!
//! All implementations are clean-room, derived from BPHS conventions.
//! Every function is pure; nothing here touches time or ephemeris data.

pub mod amsha;
pub mod ashtakavarga;
pub mod bhava;
pub mod combustion;
pub mod dasha;
pub mod drishti;
pub mod error;
pub mod graha;
pub mod graha_relationships;
pub mod rashi;
pub mod util;

pub use amsha::{is_vargottama, navamsha_pada, navamsha_rashi};
pub use ashtakavarga::{
    ALL_CONTRIBUTORS, AshtakavargaInput, AshtakavargaResult, BAV_TOTALS, BhinnaAshtakavarga,
    Contributor, KAKSHA_LORDS, KAKSHA_SPAN, Kaksha, Prastara, SAV_TOTAL, SarvaAshtakavarga,
    calculate_ashtakavarga, calculate_prastara, calculate_sav, contributes, ekadhipatya_sodhana,
    kaksha_of, trikona_sodhana,
};
pub use bhava::{Bhava, house_lord, houses_ruled_by};
pub use combustion::{combustion_threshold, is_combust};
pub use dasha::{ALL_DASHA_LEVELS, DashaLevel, MAX_DASHA_DEPTH};
pub use drishti::{
    ALL_ANGULAR_ASPECTS, AngularAspect, AspectMatch, angular_aspect, aspected_houses,
    aspects_rashi, house_distance, mutual_aspect,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS, rashi_lord};
pub use graha_relationships::{
    BeneficNature, Dignity, MutualRelation, NaisargikaMaitri, debilitation_rashi,
    dignity_in_rashi, exaltation_degree, exaltation_rashi, moolatrikone_range, mutual_relation,
    naisargika_maitri, natural_benefic_malefic, own_signs, yogakaraka,
};
pub use rashi::{
    ALL_RASHIS, Dms, Rashi, RashiElement, RashiInfo, deg_to_dms, rashi_from_longitude,
    rashi_index_from_longitude,
};
pub use util::{angular_separation, normalize_360};
