//! Whole-sign bhava (house) helpers.
//!
//! Houses are counted from the lagna rashi, one sign per house. Groupings
//! follow BPHS: kendra (1,4,7,10), trikona (1,5,9), dusthana (6,8,12),
//! upachaya (3,6,10,11).
//!
//! Clean-room implementation from BPHS.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::{Graha, rashi_lord};
use crate::rashi::{ALL_RASHIS, Rashi};

/// A validated house number in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Bhava(u8);

impl Bhava {
    pub fn new(number: u8) -> Result<Self, VedicError> {
        if (1..=12).contains(&number) {
            Ok(Self(number))
        } else {
            Err(VedicError::InvalidHouse(number))
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// House occupied by `rashi` for a lagna in `lagna`.
    pub const fn of_rashi(lagna: Rashi, rashi: Rashi) -> Self {
        Self((rashi.index() + 12 - lagna.index()) % 12 + 1)
    }

    /// Rashi occupying this house for a lagna in `lagna`.
    pub const fn rashi(self, lagna: Rashi) -> Rashi {
        Rashi::from_index_wrapping(lagna.index() + self.0 - 1)
    }

    pub const fn is_kendra(self) -> bool {
        matches!(self.0, 1 | 4 | 7 | 10)
    }

    pub const fn is_trikona(self) -> bool {
        matches!(self.0, 1 | 5 | 9)
    }
}

impl TryFrom<u8> for Bhava {
    type Error = VedicError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Bhava> for u8 {
    fn from(b: Bhava) -> Self {
        b.0
    }
}

impl std::fmt::Display for Bhava {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Houses ruled by a graha for a given lagna, in ascending order.
/// Empty for Rahu/Ketu.
pub fn houses_ruled_by(graha: Graha, lagna: Rashi) -> Vec<Bhava> {
    let mut houses: Vec<Bhava> = ALL_RASHIS
        .into_iter()
        .filter(|&r| rashi_lord(r) == graha)
        .map(|r| Bhava::of_rashi(lagna, r))
        .collect();
    houses.sort();
    houses
}

/// Lord of a house for a given lagna.
pub const fn house_lord(bhava: Bhava, lagna: Rashi) -> Graha {
    rashi_lord(bhava.rashi(lagna))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(n: u8) -> Bhava {
        Bhava::new(n).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Bhava::new(0), Err(VedicError::InvalidHouse(0)));
        assert_eq!(Bhava::new(13), Err(VedicError::InvalidHouse(13)));
        assert!(Bhava::new(12).is_ok());
    }

    #[test]
    fn house_of_rashi_and_back() {
        let lagna = Rashi::Vrischika;
        assert_eq!(Bhava::of_rashi(lagna, Rashi::Vrischika).number(), 1);
        assert_eq!(Bhava::of_rashi(lagna, Rashi::Karka).number(), 9);
        for n in 1..=12 {
            let h = b(n);
            assert_eq!(Bhava::of_rashi(lagna, h.rashi(lagna)), h);
        }
    }

    #[test]
    fn groupings() {
        assert!(b(1).is_kendra() && b(1).is_trikona());
        assert!(b(10).is_kendra() && !b(10).is_trikona());
        assert!(!b(2).is_kendra() && !b(2).is_trikona());
    }

    #[test]
    fn jupiter_rules_second_and_fifth_for_scorpio() {
        let houses: Vec<u8> = houses_ruled_by(Graha::Guru, Rashi::Vrischika)
            .into_iter()
            .map(Bhava::number)
            .collect();
        assert_eq!(houses, vec![2, 5]);
        assert!(houses_ruled_by(Graha::Rahu, Rashi::Mesha).is_empty());
    }

    #[test]
    fn house_lord_lookup() {
        assert_eq!(house_lord(b(1), Rashi::Mesha), Graha::Mangal);
        assert_eq!(house_lord(b(10), Rashi::Mesha), Graha::Shani);
    }

    #[test]
    fn serde_round_trip_validates() {
        let ok: Result<Bhava, _> = serde_json::from_str("7");
        assert_eq!(ok.map(Bhava::number).ok(), Some(7));
        let bad: Result<Bhava, _> = serde_json::from_str("13");
        assert!(bad.is_err());
    }
}
