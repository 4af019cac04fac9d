//! Graha relationship, dignity, and classification system.
//!
//! Provides exaltation/debilitation data, moolatrikone ranges, own-sign
//! ownership, natural (naisargika) friendship and its two-way reading,
//! naisargika-only dignity, benefic/malefic classification, and the
//! yogakaraka of each lagna.
//!
//! Clean-room implementation from BPHS (Brihat Parashara Hora Shastra).

use serde::{Deserialize, Serialize};

use crate::graha::{Graha, rashi_lord};
use crate::rashi::{Rashi, rashi_from_longitude};

// ---------------------------------------------------------------------------
// Exaltation & Debilitation
// ---------------------------------------------------------------------------

/// Exaltation degree (sidereal) for sapta grahas. Returns None for Rahu/Ketu.
///
/// BPHS: Sun 10 Ari=10, Moon 3 Tau=33, Mars 28 Cap=298,
/// Mercury 15 Vir=165, Jupiter 5 Can=95, Venus 27 Pis=357, Saturn 20 Lib=200.
pub const fn exaltation_degree(graha: Graha) -> Option<f64> {
    match graha {
        Graha::Surya => Some(10.0),
        Graha::Chandra => Some(33.0),
        Graha::Mangal => Some(298.0),
        Graha::Buddh => Some(165.0),
        Graha::Guru => Some(95.0),
        Graha::Shukra => Some(357.0),
        Graha::Shani => Some(200.0),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Exaltation rashi (the sign holding the exaltation degree).
pub const fn exaltation_rashi(graha: Graha) -> Option<Rashi> {
    match exaltation_degree(graha) {
        Some(e) => Some(Rashi::from_index_wrapping((e / 30.0) as u8)),
        None => None,
    }
}

/// Debilitation rashi, the 7th from exaltation.
pub const fn debilitation_rashi(graha: Graha) -> Option<Rashi> {
    match exaltation_rashi(graha) {
        Some(r) => Some(Rashi::from_index_wrapping(r.index() + 6)),
        None => None,
    }
}

// ---------------------------------------------------------------------------
// Moolatrikone & Own Signs
// ---------------------------------------------------------------------------

/// Moolatrikone range: (rashi, start_deg_in_rashi, end_deg_in_rashi).
/// Returns None for Rahu/Ketu.
///
/// Sun 0-20 Leo, Moon 4-20 Tau, Mars 0-12 Ari, Mercury 16-20 Vir,
/// Jupiter 0-10 Sag, Venus 0-15 Lib, Saturn 0-20 Aqu.
pub const fn moolatrikone_range(graha: Graha) -> Option<(Rashi, f64, f64)> {
    match graha {
        Graha::Surya => Some((Rashi::Simha, 0.0, 20.0)),
        Graha::Chandra => Some((Rashi::Vrishabha, 4.0, 20.0)),
        Graha::Mangal => Some((Rashi::Mesha, 0.0, 12.0)),
        Graha::Buddh => Some((Rashi::Kanya, 16.0, 20.0)),
        Graha::Guru => Some((Rashi::Dhanu, 0.0, 10.0)),
        Graha::Shukra => Some((Rashi::Tula, 0.0, 15.0)),
        Graha::Shani => Some((Rashi::Kumbha, 0.0, 20.0)),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Own-sign rashis for sapta grahas. Empty for Rahu/Ketu.
pub const fn own_signs(graha: Graha) -> &'static [Rashi] {
    match graha {
        Graha::Surya => &[Rashi::Simha],
        Graha::Chandra => &[Rashi::Karka],
        Graha::Mangal => &[Rashi::Mesha, Rashi::Vrischika],
        Graha::Buddh => &[Rashi::Mithuna, Rashi::Kanya],
        Graha::Guru => &[Rashi::Dhanu, Rashi::Meena],
        Graha::Shukra => &[Rashi::Vrishabha, Rashi::Tula],
        Graha::Shani => &[Rashi::Makara, Rashi::Kumbha],
        Graha::Rahu | Graha::Ketu => &[],
    }
}

// ---------------------------------------------------------------------------
// Natural Friendship (Naisargika Maitri)
// ---------------------------------------------------------------------------

/// Natural relationship of one graha towards another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NaisargikaMaitri {
    Friend,
    Enemy,
    Neutral,
}

/// Natural (naisargika) friendship of `graha` towards `other` (BPHS table).
/// Returns Neutral for any pairing involving Rahu/Ketu, and for self.
pub const fn naisargika_maitri(graha: Graha, other: Graha) -> NaisargikaMaitri {
    use Graha::*;
    use NaisargikaMaitri::*;

    match (graha, other) {
        (Rahu | Ketu, _) | (_, Rahu | Ketu) => Neutral,

        (Surya, Chandra | Mangal | Guru) => Friend,
        (Surya, Shukra | Shani) => Enemy,

        (Chandra, Surya | Buddh) => Friend,

        (Mangal, Surya | Chandra | Guru) => Friend,
        (Mangal, Buddh) => Enemy,

        (Buddh, Surya | Shukra) => Friend,
        (Buddh, Chandra) => Enemy,

        (Guru, Surya | Chandra | Mangal) => Friend,
        (Guru, Buddh | Shukra) => Enemy,

        (Shukra, Buddh | Shani) => Friend,
        (Shukra, Surya | Chandra) => Enemy,

        (Shani, Buddh | Shukra) => Friend,
        (Shani, Surya | Chandra | Mangal) => Enemy,

        _ => Neutral,
    }
}

/// Two-way reading of natural friendship between a pair of grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutualRelation {
    /// Each counts the other a friend.
    MutualFriends,
    /// One side friendly, the other neutral.
    OneSidedFriend,
    /// Either side counts the other an enemy.
    Inimical,
    Neutral,
}

/// Combine both directions of [`naisargika_maitri`].
///
/// Enmity on either side dominates, then friendship.
pub const fn mutual_relation(a: Graha, b: Graha) -> MutualRelation {
    use NaisargikaMaitri::*;
    match (naisargika_maitri(a, b), naisargika_maitri(b, a)) {
        (Enemy, _) | (_, Enemy) => MutualRelation::Inimical,
        (Friend, Friend) => MutualRelation::MutualFriends,
        (Friend, _) | (_, Friend) => MutualRelation::OneSidedFriend,
        _ => MutualRelation::Neutral,
    }
}

// ---------------------------------------------------------------------------
// Dignity Determination
// ---------------------------------------------------------------------------

/// Dignity of a graha in a rashi (naisargika-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dignity {
    Exalted,
    Moolatrikone,
    OwnSign,
    Mitra,
    Sama,
    Shatru,
    Debilitated,
}

impl Dignity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exalted => "Exalted",
            Self::Moolatrikone => "Moolatrikona",
            Self::OwnSign => "Own sign",
            Self::Mitra => "Friendly",
            Self::Sama => "Neutral",
            Self::Shatru => "Enemy",
            Self::Debilitated => "Debilitated",
        }
    }
}

fn is_in_moolatrikone(graha: Graha, sidereal_lon: f64) -> bool {
    match moolatrikone_range(graha) {
        Some((rashi, start, end)) => {
            let info = rashi_from_longitude(sidereal_lon);
            info.rashi == rashi && info.degrees_in_rashi >= start && info.degrees_in_rashi < end
        }
        None => false,
    }
}

/// Naisargika-only dignity of a graha at a sidereal longitude.
///
/// Priority: exaltation > debilitation > moolatrikone > own sign >
/// natural friendship with the rashi lord. Rahu/Ketu are always Sama.
pub fn dignity_in_rashi(graha: Graha, sidereal_lon: f64) -> Dignity {
    if graha.is_node() {
        return Dignity::Sama;
    }
    let rashi = Rashi::from_longitude(sidereal_lon);

    if exaltation_rashi(graha) == Some(rashi) {
        return Dignity::Exalted;
    }
    if debilitation_rashi(graha) == Some(rashi) {
        return Dignity::Debilitated;
    }
    if is_in_moolatrikone(graha, sidereal_lon) {
        return Dignity::Moolatrikone;
    }
    if own_signs(graha).contains(&rashi) {
        return Dignity::OwnSign;
    }

    match naisargika_maitri(graha, rashi_lord(rashi)) {
        NaisargikaMaitri::Friend => Dignity::Mitra,
        NaisargikaMaitri::Enemy => Dignity::Shatru,
        NaisargikaMaitri::Neutral => Dignity::Sama,
    }
}

// ---------------------------------------------------------------------------
// Benefic/Malefic, Yogakaraka
// ---------------------------------------------------------------------------

/// Natural benefic/malefic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeneficNature {
    Benefic,
    Malefic,
}

/// Natural benefic/malefic for each graha. Moon is taken as Benefic.
pub const fn natural_benefic_malefic(graha: Graha) -> BeneficNature {
    match graha {
        Graha::Chandra | Graha::Buddh | Graha::Guru | Graha::Shukra => BeneficNature::Benefic,
        Graha::Surya | Graha::Mangal | Graha::Shani | Graha::Rahu | Graha::Ketu => {
            BeneficNature::Malefic
        }
    }
}

/// Yogakaraka (single planet ruling both a kendra and a trikona) for a lagna.
///
/// Dual signs have none.
pub const fn yogakaraka(lagna: Rashi) -> Option<Graha> {
    match lagna {
        Rashi::Mesha | Rashi::Vrishabha | Rashi::Tula => Some(Graha::Shani),
        Rashi::Karka | Rashi::Simha => Some(Graha::Mangal),
        Rashi::Vrischika => Some(Graha::Chandra),
        Rashi::Makara | Rashi::Kumbha => Some(Graha::Shukra),
        Rashi::Mithuna | Rashi::Kanya | Rashi::Dhanu | Rashi::Meena => None,
    }
}
