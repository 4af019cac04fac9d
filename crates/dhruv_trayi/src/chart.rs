//! Natal chart and transit snapshot inputs.
//!
//! Both are supplied by callers; the engine only reads them. Any of the
//! nine bodies may be absent.

use chrono::{DateTime, Utc};
use dhruv_vedic_base::{ALL_GRAHAS, AshtakavargaInput, Bhava, Graha, Rashi, SAPTA_GRAHAS};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::TrayiError;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Sidereal position of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrahaPosition {
    /// Sidereal longitude in degrees.
    pub longitude: f64,
    #[serde(default)]
    pub retrograde: bool,
}

impl GrahaPosition {
    pub const fn new(longitude: f64) -> Self {
        Self {
            longitude,
            retrograde: false,
        }
    }

    pub const fn retrograde(mut self) -> Self {
        self.retrograde = true;
        self
    }

    pub fn rashi(&self) -> Rashi {
        Rashi::from_longitude(self.longitude)
    }

    fn check(&self, graha: Graha) -> Result<(), TrayiError> {
        if !self.longitude.is_finite() {
            return Err(TrayiError::Chart(format!(
                "{} longitude is not finite",
                graha.english_name()
            )));
        }
        Ok(())
    }
}

/// Serde helper: nine per-graha slots as a map keyed by graha.
mod graha_slots {
    use dhruv_vedic_base::{ALL_GRAHAS, Graha};
    use indexmap::IndexMap;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(slots: &[Option<T>; 9], s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut map = s.serialize_map(Some(slots.iter().flatten().count()))?;
        for (graha, slot) in ALL_GRAHAS.iter().zip(slots) {
            if let Some(value) = slot {
                map.serialize_entry(graha, value)?;
            }
        }
        map.end()
    }

    pub fn deserialize<'de, D, T>(d: D) -> Result<[Option<T>; 9], D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let entries: IndexMap<Graha, T> = IndexMap::deserialize(d)?;
        let mut slots: [Option<T>; 9] = Default::default();
        for (graha, value) in entries {
            slots[graha.index() as usize] = Some(value);
        }
        Ok(slots)
    }
}

/// Positions of the bodies at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub instant: DateTime<Utc>,
    #[serde(with = "graha_slots")]
    positions: [Option<GrahaPosition>; 9],
}

impl PositionSnapshot {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            positions: [None; 9],
        }
    }

    pub fn with(mut self, graha: Graha, position: GrahaPosition) -> Self {
        self.set(graha, position);
        self
    }

    pub fn set(&mut self, graha: Graha, position: GrahaPosition) {
        self.positions[graha.index() as usize] = Some(position);
    }

    pub fn get(&self, graha: Graha) -> Option<&GrahaPosition> {
        self.positions[graha.index() as usize].as_ref()
    }

    /// Present bodies in graha order.
    pub fn iter(&self) -> impl Iterator<Item = (Graha, &GrahaPosition)> {
        ALL_GRAHAS
            .iter()
            .zip(&self.positions)
            .filter_map(|(g, p)| p.as_ref().map(|p| (*g, p)))
    }

    /// Same positions re-stamped at another instant.
    pub fn at(&self, instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            positions: self.positions,
        }
    }
}

// ---------------------------------------------------------------------------
// Natal chart
// ---------------------------------------------------------------------------

/// A body's natal placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NatalPlacement {
    pub position: GrahaPosition,
    pub rashi: Rashi,
    pub house: Bhava,
}

/// Immutable natal snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChartInput", into = "ChartInput")]
pub struct NatalChart {
    ascendant: f64,
    lagna: Rashi,
    placements: [Option<NatalPlacement>; 9],
}

impl NatalChart {
    /// Chart with caller-supplied houses.
    pub fn new(
        ascendant: f64,
        placements: [Option<NatalPlacement>; 9],
    ) -> Result<Self, TrayiError> {
        if !ascendant.is_finite() {
            return Err(TrayiError::Chart("ascendant is not finite".into()));
        }
        for (graha, placement) in ALL_GRAHAS.iter().zip(&placements) {
            if let Some(p) = placement {
                p.position.check(*graha)?;
            }
        }
        Ok(Self {
            ascendant,
            lagna: Rashi::from_longitude(ascendant),
            placements,
        })
    }

    /// Chart with whole-sign houses counted from the ascendant's rashi.
    pub fn whole_sign(
        ascendant: f64,
        positions: impl IntoIterator<Item = (Graha, GrahaPosition)>,
    ) -> Result<Self, TrayiError> {
        let lagna = Rashi::from_longitude(ascendant);
        let mut placements = [None; 9];
        for (graha, position) in positions {
            position.check(graha)?;
            let rashi = position.rashi();
            placements[graha.index() as usize] = Some(NatalPlacement {
                position,
                rashi,
                house: Bhava::of_rashi(lagna, rashi),
            });
        }
        Self::new(ascendant, placements)
    }

    pub fn ascendant(&self) -> f64 {
        self.ascendant
    }

    /// Rashi of the ascendant.
    pub fn lagna(&self) -> Rashi {
        self.lagna
    }

    pub fn placement(&self, graha: Graha) -> Option<&NatalPlacement> {
        self.placements[graha.index() as usize].as_ref()
    }

    pub fn moon_rashi(&self) -> Option<Rashi> {
        self.placement(Graha::Chandra).map(|p| p.rashi)
    }

    /// Present placements in graha order.
    pub fn iter(&self) -> impl Iterator<Item = (Graha, &NatalPlacement)> {
        ALL_GRAHAS
            .iter()
            .zip(&self.placements)
            .filter_map(|(g, p)| p.as_ref().map(|p| (*g, p)))
    }

    /// Sign placements for the Ashtakavarga tables; `None` unless all seven
    /// classical bodies are present.
    pub fn ashtakavarga_input(&self) -> Option<AshtakavargaInput> {
        let mut graha_rashis = [Rashi::Mesha; 7];
        for (slot, graha) in graha_rashis.iter_mut().zip(SAPTA_GRAHAS) {
            *slot = self.placement(graha)?.rashi;
        }
        Some(AshtakavargaInput {
            graha_rashis,
            lagna: self.lagna,
        })
    }
}

/// One body in the serialized chart. Whole-sign house when `house` is absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementInput {
    #[serde(flatten)]
    pub position: GrahaPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<Bhava>,
}

/// Serialized form of [`NatalChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInput {
    pub ascendant: f64,
    pub grahas: IndexMap<Graha, PlacementInput>,
}

impl TryFrom<ChartInput> for NatalChart {
    type Error = TrayiError;

    fn try_from(input: ChartInput) -> Result<Self, Self::Error> {
        let lagna = Rashi::from_longitude(input.ascendant);
        let mut placements = [None; 9];
        for (graha, p) in input.grahas {
            let rashi = p.position.rashi();
            placements[graha.index() as usize] = Some(NatalPlacement {
                position: p.position,
                rashi,
                house: p.house.unwrap_or(Bhava::of_rashi(lagna, rashi)),
            });
        }
        Self::new(input.ascendant, placements)
    }
}

impl From<NatalChart> for ChartInput {
    fn from(chart: NatalChart) -> Self {
        Self {
            ascendant: chart.ascendant,
            grahas: chart
                .iter()
                .map(|(g, p)| {
                    let input = PlacementInput {
                        position: p.position,
                        house: Some(p.house),
                    };
                    (g, input)
                })
                .collect(),
        }
    }
}
