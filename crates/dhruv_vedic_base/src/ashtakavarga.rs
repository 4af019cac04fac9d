//! Ashtakavarga (benefic points) calculations.
//!
//! Implements the Prastara (contributor-by-sign grid), Bhinna Ashtakavarga
//! (BAV), Sarvashtakavarga (SAV), Sodhana reductions, and Kaksha lookup
//! per BPHS standard rules.
//!
//! For each of 7 grahas (Sun through Saturn), 8 contributors (7 grahas + Lagna)
//! assign benefic points to rashis based on their relative offset.
//!
//! Mathematical invariants (totals across 12 rashis, constant for ALL charts):
//! - Sun: 48, Moon: 49, Mars: 39, Mercury: 54, Jupiter: 56, Venus: 52, Saturn: 39
//! - SAV total: 337
//!
//! Clean-room implementation from BPHS (Brihat Parashara Hora Shastra).

use serde::{Deserialize, Serialize};

use crate::graha::{Graha, SAPTA_GRAHAS};
use crate::rashi::{ALL_RASHIS, Rashi, rashi_from_longitude};

// ---------------------------------------------------------------------------
// Contributors
// ---------------------------------------------------------------------------

/// One of the 8 bindu contributors: the sapta grahas plus the Lagna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contributor {
    Graha(Graha),
    Lagna,
}

/// Contributors in rules-table order.
pub const ALL_CONTRIBUTORS: [Contributor; 8] = [
    Contributor::Graha(Graha::Surya),
    Contributor::Graha(Graha::Chandra),
    Contributor::Graha(Graha::Mangal),
    Contributor::Graha(Graha::Buddh),
    Contributor::Graha(Graha::Guru),
    Contributor::Graha(Graha::Shukra),
    Contributor::Graha(Graha::Shani),
    Contributor::Lagna,
];

impl Contributor {
    /// Column in the rules table. `None` for Rahu/Ketu.
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Graha(Graha::Rahu | Graha::Ketu) => None,
            Self::Graha(g) => Some(g.index() as usize),
            Self::Lagna => Some(7),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Graha(g) => g.english_name(),
            Self::Lagna => "Lagna",
        }
    }
}

// ---------------------------------------------------------------------------
// Rules table (bitmask encoding)
// ---------------------------------------------------------------------------

/// Build a bitmask from 1-based offset values.
const fn bits(offsets: &[u8]) -> u16 {
    let mut mask = 0u16;
    let mut i = 0;
    while i < offsets.len() {
        mask |= 1u16 << offsets[i];
        i += 1;
    }
    mask
}

/// RULES[target][contributor] = bitmask of favorable 1-based offsets
/// (1 = contributor's own rashi, 12 = the rashi behind it).
const RULES: [[u16; 8]; 7] = [
    // Sun
    [
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 6, 10, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 5, 6, 9, 10, 11, 12]),
        bits(&[5, 6, 9, 11]),
        bits(&[6, 7, 12]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 4, 6, 10, 11, 12]),
    ],
    // Moon
    [
        bits(&[3, 6, 7, 8, 10, 11]),
        bits(&[1, 3, 6, 7, 10, 11]),
        bits(&[2, 3, 5, 6, 9, 10, 11]),
        bits(&[1, 3, 4, 5, 7, 8, 10, 11]),
        bits(&[1, 4, 7, 8, 10, 11, 12]),
        bits(&[3, 4, 5, 7, 9, 10, 11]),
        bits(&[3, 5, 6, 11]),
        bits(&[3, 6, 10, 11]),
    ],
    // Mars
    [
        bits(&[3, 5, 6, 10, 11]),
        bits(&[3, 6, 11]),
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[3, 5, 6, 11]),
        bits(&[6, 10, 11, 12]),
        bits(&[6, 8, 11, 12]),
        bits(&[1, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 3, 6, 10, 11]),
    ],
    // Mercury
    [
        bits(&[5, 6, 9, 11, 12]),
        bits(&[2, 4, 6, 8, 10, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 3, 5, 6, 9, 10, 11, 12]),
        bits(&[6, 8, 11, 12]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 2, 4, 6, 8, 10, 11]),
    ],
    // Jupiter
    [
        bits(&[1, 2, 3, 4, 7, 8, 9, 10, 11]),
        bits(&[2, 5, 7, 9, 11]),
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[1, 2, 4, 5, 6, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 7, 8, 10, 11]),
        bits(&[2, 5, 6, 9, 10, 11]),
        bits(&[3, 5, 6, 12]),
        bits(&[1, 2, 4, 5, 6, 7, 9, 10, 11]),
    ],
    // Venus
    [
        bits(&[8, 11, 12]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11, 12]),
        bits(&[3, 4, 6, 9, 11, 12]),
        bits(&[3, 5, 6, 9, 11]),
        bits(&[5, 8, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 10, 11]),
        bits(&[3, 4, 5, 8, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11]),
    ],
    // Saturn
    [
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[3, 6, 11]),
        bits(&[3, 5, 6, 10, 11, 12]),
        bits(&[6, 8, 9, 10, 11, 12]),
        bits(&[5, 6, 11, 12]),
        bits(&[6, 11, 12]),
        bits(&[3, 5, 6, 11]),
        bits(&[1, 3, 4, 6, 10, 11]),
    ],
];

/// Expected BAV totals per graha (for validation).
pub const BAV_TOTALS: [u8; 7] = [48, 49, 39, 54, 56, 52, 39];

/// Expected SAV total (constant for all charts).
pub const SAV_TOTAL: u16 = 337;

/// Whether `contributor`, sitting in `contributor_rashi`, gives `target` a
/// bindu in `rashi`. `None` when target or contributor is a node.
pub fn contributes(
    target: Graha,
    contributor: Contributor,
    contributor_rashi: Rashi,
    rashi: Rashi,
) -> Option<bool> {
    if target.is_node() {
        return None;
    }
    let column = contributor.index()?;
    let offset = (rashi.index() + 12 - contributor_rashi.index()) % 12 + 1;
    Some((RULES[target.index() as usize][column] >> offset) & 1 == 1)
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Natal sign placements the tables are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AshtakavargaInput {
    /// Rashi of each sapta graha, Sun..Saturn.
    pub graha_rashis: [Rashi; 7],
    pub lagna: Rashi,
}

impl AshtakavargaInput {
    /// Rashi occupied by a contributor. `None` for Rahu/Ketu.
    pub fn contributor_rashi(&self, contributor: Contributor) -> Option<Rashi> {
        match contributor.index()? {
            7 => Some(self.lagna),
            i => Some(self.graha_rashis[i]),
        }
    }
}

// ---------------------------------------------------------------------------
// Prastara and Bhinna Ashtakavarga (BAV)
// ---------------------------------------------------------------------------

/// Prastara for one graha: `cells[contributor][rashi]` marks a bindu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prastara {
    pub graha: Graha,
    pub cells: [[bool; 12]; 8],
}

impl Prastara {
    /// Whether the contributor gave a bindu in the rashi.
    pub fn has_bindu(&self, contributor: Contributor, rashi: Rashi) -> bool {
        contributor
            .index()
            .is_some_and(|c| self.cells[c][rashi.index() as usize])
    }

    /// Column sums of the grid.
    pub fn to_bav(&self) -> BhinnaAshtakavarga {
        let mut points = [0u8; 12];
        for row in &self.cells {
            for (p, &cell) in points.iter_mut().zip(row) {
                *p += u8::from(cell);
            }
        }
        BhinnaAshtakavarga {
            graha: self.graha,
            points,
        }
    }
}

/// Build the prastara grid for one sapta graha. `None` for Rahu/Ketu.
pub fn calculate_prastara(graha: Graha, input: &AshtakavargaInput) -> Option<Prastara> {
    if graha.is_node() {
        return None;
    }
    let mut cells = [[false; 12]; 8];
    for (c, contributor) in ALL_CONTRIBUTORS.into_iter().enumerate() {
        let from = input.contributor_rashi(contributor)?;
        for rashi in ALL_RASHIS {
            cells[c][rashi.index() as usize] = contributes(graha, contributor, from, rashi)?;
        }
    }
    Some(Prastara { graha, cells })
}

/// Bhinna Ashtakavarga for a single graha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BhinnaAshtakavarga {
    pub graha: Graha,
    /// Benefic points per rashi (0-based index, max 8 each).
    pub points: [u8; 12],
}

impl BhinnaAshtakavarga {
    /// Total points across all 12 rashis.
    pub fn total(&self) -> u8 {
        self.points.iter().sum()
    }

    pub fn points_in(&self, rashi: Rashi) -> u8 {
        self.points[rashi.index() as usize]
    }
}

// ---------------------------------------------------------------------------
// Sarvashtakavarga (SAV)
// ---------------------------------------------------------------------------

/// Sarvashtakavarga: combined points plus sodhana reductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SarvaAshtakavarga {
    /// Sum of all 7 BAVs per rashi.
    pub total_points: [u8; 12],
    /// After Trikona Sodhana (trine reduction).
    pub after_trikona: [u8; 12],
    /// After Ekadhipatya Sodhana (same-lord reduction).
    pub after_ekadhipatya: [u8; 12],
}

impl SarvaAshtakavarga {
    pub fn points_in(&self, rashi: Rashi) -> u8 {
        self.total_points[rashi.index() as usize]
    }
}

/// Combine the 7 BAVs and apply both sodhanas.
pub fn calculate_sav(bavs: &[BhinnaAshtakavarga; 7]) -> SarvaAshtakavarga {
    let mut total_points = [0u8; 12];
    for bav in bavs {
        for (t, p) in total_points.iter_mut().zip(bav.points) {
            *t += p;
        }
    }
    let after_trikona = trikona_sodhana(&total_points);
    let after_ekadhipatya = ekadhipatya_sodhana(&after_trikona);
    SarvaAshtakavarga {
        total_points,
        after_trikona,
        after_ekadhipatya,
    }
}

// ---------------------------------------------------------------------------
// Sodhana (reductions)
// ---------------------------------------------------------------------------

/// Trines by element: fire, earth, air, water.
const TRIKONA_GROUPS: [[usize; 3]; 4] = [[0, 4, 8], [1, 5, 9], [2, 6, 10], [3, 7, 11]];

/// Trikona Sodhana: subtract the minimum of each trine from its members.
pub fn trikona_sodhana(totals: &[u8; 12]) -> [u8; 12] {
    let mut result = *totals;
    for group in &TRIKONA_GROUPS {
        let min_val = group.iter().map(|&i| result[i]).min().unwrap_or(0);
        for &i in group {
            result[i] -= min_val;
        }
    }
    result
}

/// Mercury (Mithuna, Kanya) and Jupiter (Dhanu, Meena). The other dual
/// lordships fall in different trines and are already reduced.
const EKADHIPATYA_PAIRS: [[usize; 2]; 2] = [[2, 5], [8, 11]];

/// Ekadhipatya Sodhana on a trikona-reduced table.
pub fn ekadhipatya_sodhana(after_trikona: &[u8; 12]) -> [u8; 12] {
    let mut result = *after_trikona;
    for [a, b] in EKADHIPATYA_PAIRS {
        let min_val = result[a].min(result[b]);
        result[a] -= min_val;
        result[b] -= min_val;
    }
    result
}

// ---------------------------------------------------------------------------
// Combined result
// ---------------------------------------------------------------------------

/// Complete Ashtakavarga: 7 prastaras, their BAVs, and the SAV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AshtakavargaResult {
    pub prastaras: [Prastara; 7],
    pub bavs: [BhinnaAshtakavarga; 7],
    pub sav: SarvaAshtakavarga,
}

impl AshtakavargaResult {
    /// BAV of a sapta graha; `None` for the nodes.
    pub fn bav(&self, graha: Graha) -> Option<&BhinnaAshtakavarga> {
        if graha.is_node() {
            None
        } else {
            self.bavs.get(graha.index() as usize)
        }
    }

    pub fn prastara(&self, graha: Graha) -> Option<&Prastara> {
        if graha.is_node() {
            None
        } else {
            self.prastaras.get(graha.index() as usize)
        }
    }
}

/// Calculate the complete Ashtakavarga for the given placements.
pub fn calculate_ashtakavarga(input: &AshtakavargaInput) -> AshtakavargaResult {
    let empty = Prastara {
        graha: Graha::Surya,
        cells: [[false; 12]; 8],
    };
    let mut prastaras = [empty; 7];
    for (slot, graha) in prastaras.iter_mut().zip(SAPTA_GRAHAS) {
        if let Some(p) = calculate_prastara(graha, input) {
            *slot = p;
        }
    }
    let bavs = prastaras.map(|p| p.to_bav());
    let sav = calculate_sav(&bavs);
    AshtakavargaResult {
        prastaras,
        bavs,
        sav,
    }
}

// ---------------------------------------------------------------------------
// Kaksha
// ---------------------------------------------------------------------------

/// Width of one kaksha (3°45').
pub const KAKSHA_SPAN: f64 = 30.0 / 8.0;

/// Kaksha lords in order within every rashi.
pub const KAKSHA_LORDS: [Contributor; 8] = [
    Contributor::Graha(Graha::Shani),
    Contributor::Graha(Graha::Guru),
    Contributor::Graha(Graha::Mangal),
    Contributor::Graha(Graha::Surya),
    Contributor::Graha(Graha::Shukra),
    Contributor::Graha(Graha::Buddh),
    Contributor::Graha(Graha::Chandra),
    Contributor::Lagna,
];

/// Kaksha position of a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kaksha {
    pub rashi: Rashi,
    /// 0..=7 within the rashi.
    pub index: u8,
    pub lord: Contributor,
}

/// Kaksha containing a sidereal longitude.
pub fn kaksha_of(sidereal_lon: f64) -> Kaksha {
    let info = rashi_from_longitude(sidereal_lon);
    let index = ((info.degrees_in_rashi / KAKSHA_SPAN).floor() as u8).min(7);
    Kaksha {
        rashi: info.rashi,
        index,
        lord: KAKSHA_LORDS[index as usize],
    }
}
