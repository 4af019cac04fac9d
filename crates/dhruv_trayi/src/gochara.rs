//! Gochara tables: favorable and neutral houses from the natal Moon, and
//! the vedha (obstruction) house of each favorable position.
//!
//! Clean-room implementation from standard gochara texts.

use dhruv_vedic_base::Graha;
use serde::{Deserialize, Serialize};

/// Classification of a transit house from the natal Moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GocharaClass {
    Favorable,
    Neutral,
    Unfavorable,
}

impl GocharaClass {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Favorable => "Favorable",
            Self::Neutral => "Neutral",
            Self::Unfavorable => "Unfavorable",
        }
    }
}

/// Houses from the Moon where a transit is favorable.
pub const fn favorable_houses(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Surya => &[3, 6, 10, 11],
        Graha::Chandra => &[1, 3, 6, 7, 10, 11],
        Graha::Mangal => &[3, 6, 11],
        Graha::Buddh => &[2, 4, 6, 8, 10, 11],
        Graha::Guru => &[2, 5, 7, 9, 11],
        Graha::Shukra => &[1, 2, 3, 4, 5, 8, 9, 11, 12],
        Graha::Shani => &[3, 6, 11],
        Graha::Rahu | Graha::Ketu => &[3, 6, 10, 11],
    }
}

/// Houses from the Moon where a transit is neutral.
pub const fn neutral_houses(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Surya => &[1, 2, 5],
        Graha::Chandra => &[2, 5],
        Graha::Mangal => &[1, 10],
        Graha::Buddh => &[1, 3, 5],
        Graha::Guru => &[1, 4, 6, 8, 10],
        Graha::Shukra => &[6, 7, 10],
        Graha::Shani => &[1, 2, 10],
        Graha::Rahu | Graha::Ketu => &[1, 2, 5],
    }
}

/// Vedha pairs `(favorable house, obstructing house)`. Nodes have none.
const fn vedha_pairs(graha: Graha) -> &'static [(u8, u8)] {
    match graha {
        Graha::Surya => &[(3, 9), (6, 12), (10, 4), (11, 5)],
        Graha::Chandra => &[(1, 5), (3, 9), (6, 12), (7, 2), (10, 4), (11, 8)],
        Graha::Mangal => &[(3, 12), (6, 9), (11, 5)],
        Graha::Buddh => &[(2, 5), (4, 3), (6, 9), (8, 1), (10, 8), (11, 12)],
        Graha::Guru => &[(2, 12), (5, 4), (7, 3), (9, 10), (11, 8)],
        Graha::Shukra => &[
            (1, 8),
            (2, 7),
            (3, 1),
            (4, 10),
            (5, 9),
            (8, 5),
            (9, 11),
            (11, 6),
            (12, 3),
        ],
        Graha::Shani => &[(3, 12), (6, 9), (11, 5)],
        Graha::Rahu | Graha::Ketu => &[],
    }
}

/// Obstructing house for a favorable transit house, if one is defined.
pub fn vedha_house(graha: Graha, house: u8) -> Option<u8> {
    vedha_pairs(graha)
        .iter()
        .find(|(fav, _)| *fav == house)
        .map(|(_, obs)| *obs)
}

/// Whether `obstructor` may cast vedha on `graha`. Sun and Saturn never
/// obstruct each other, and a body never obstructs itself.
pub const fn can_obstruct(graha: Graha, obstructor: Graha) -> bool {
    !matches!(
        (graha, obstructor),
        (Graha::Surya, Graha::Shani) | (Graha::Shani, Graha::Surya)
    ) && graha.index() != obstructor.index()
}

/// Unobstructed classification of a house from the Moon.
pub fn classify(graha: Graha, house: u8) -> GocharaClass {
    if favorable_houses(graha).contains(&house) {
        GocharaClass::Favorable
    } else if neutral_houses(graha).contains(&house) {
        GocharaClass::Neutral
    } else {
        GocharaClass::Unfavorable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhruv_vedic_base::ALL_GRAHAS;

    #[test]
    fn favorable_and_neutral_are_disjoint() {
        for g in ALL_GRAHAS {
            for h in favorable_houses(g) {
                assert!(!neutral_houses(g).contains(h), "{g:?} house {h}");
            }
        }
    }

    #[test]
    fn every_vedha_source_is_favorable() {
        for g in ALL_GRAHAS {
            for (fav, obs) in vedha_pairs(g) {
                assert!(favorable_houses(g).contains(fav));
                assert!((1..=12).contains(obs));
            }
        }
    }

    #[test]
    fn classification() {
        assert_eq!(classify(Graha::Guru, 9), GocharaClass::Favorable);
        assert_eq!(classify(Graha::Guru, 4), GocharaClass::Neutral);
        assert_eq!(classify(Graha::Guru, 12), GocharaClass::Unfavorable);
        assert_eq!(classify(Graha::Shani, 8), GocharaClass::Unfavorable);
    }

    #[test]
    fn vedha_lookup() {
        assert_eq!(vedha_house(Graha::Surya, 3), Some(9));
        assert_eq!(vedha_house(Graha::Shukra, 12), Some(3));
        assert_eq!(vedha_house(Graha::Rahu, 3), None);
        assert_eq!(vedha_house(Graha::Guru, 4), None);
    }

    #[test]
    fn sun_saturn_exemption() {
        assert!(!can_obstruct(Graha::Surya, Graha::Shani));
        assert!(!can_obstruct(Graha::Shani, Graha::Surya));
        assert!(can_obstruct(Graha::Surya, Graha::Chandra));
        assert!(!can_obstruct(Graha::Guru, Graha::Guru));
    }
}
