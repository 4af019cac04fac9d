//! Result types for the transit (gochara) pillar.

use dhruv_vedic_base::{AngularAspect, Bhava, Graha, Rashi};
use serde::{Deserialize, Serialize};

use crate::gochara::GocharaClass;
use crate::score::{NEUTRAL_SCORE, PillarScore};

/// How much attention a single transit deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Significance {
    Major,
    Significant,
    Moderate,
    Minor,
}

impl Significance {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Significant => "Significant",
            Self::Moderate => "Moderate",
            Self::Minor => "Minor",
        }
    }
}

/// A transiting body's angular aspect to a natal body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NatalAspect {
    pub natal: Graha,
    pub aspect: AngularAspect,
    pub orb: f64,
    pub delta: f64,
}

/// One body's transit evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTransit {
    pub graha: Graha,
    pub rashi: Rashi,
    /// Counted inclusively from the natal Moon's rashi.
    pub house_from_moon: u8,
    pub house_from_lagna: Bhava,
    /// Classification after vedha.
    pub class: GocharaClass,
    pub obstructed_by: Option<Graha>,
    pub retrograde: bool,
    pub aspects: Vec<NatalAspect>,
    pub score: f64,
    pub significance: Significance,
}

impl BodyTransit {
    pub fn is_favorable(&self) -> bool {
        self.class == GocharaClass::Favorable
    }
}

/// Impact of a special transit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    HighlyBeneficial,
    Beneficial,
    Neutral,
    Moderate,
    Severe,
}

/// Named slow-body configurations relative to the natal Moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitConfiguration {
    /// Saturn 12th from the Moon.
    SadeSatiRising,
    /// Saturn over the Moon.
    SadeSatiPeak,
    /// Saturn 2nd from the Moon.
    SadeSatiSetting,
    /// Saturn 8th from the Moon.
    AshtamaShani,
    /// Saturn 4th or 7th from the Moon.
    KantakShani,
    JupiterWealth,
    JupiterIntellect,
    JupiterFortune,
    JupiterGains,
    RahuOverMoon,
    /// Rahu 7th from the Moon puts Ketu over it.
    KetuOverMoon,
}

impl TransitConfiguration {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SadeSatiRising => "Sade Sati (rising)",
            Self::SadeSatiPeak => "Sade Sati (peak)",
            Self::SadeSatiSetting => "Sade Sati (setting)",
            Self::AshtamaShani => "Ashtama Shani",
            Self::KantakShani => "Kantak Shani",
            Self::JupiterWealth => "Jupiter in 2nd (wealth)",
            Self::JupiterIntellect => "Jupiter in 5th (intellect and children)",
            Self::JupiterFortune => "Jupiter in 9th (fortune)",
            Self::JupiterGains => "Jupiter in 11th (gains)",
            Self::RahuOverMoon => "Rahu over natal Moon",
            Self::KetuOverMoon => "Ketu over natal Moon",
        }
    }

    pub const fn multiplier(self) -> f64 {
        match self {
            Self::SadeSatiRising => 0.85,
            Self::SadeSatiPeak => 0.70,
            Self::SadeSatiSetting => 0.88,
            Self::AshtamaShani => 0.75,
            Self::KantakShani => 0.82,
            Self::JupiterWealth => 1.15,
            Self::JupiterIntellect => 1.18,
            Self::JupiterFortune => 1.20,
            Self::JupiterGains => 1.15,
            Self::RahuOverMoon => 0.80,
            Self::KetuOverMoon => 0.82,
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::SadeSatiPeak | Self::AshtamaShani => Severity::Severe,
            Self::SadeSatiRising
            | Self::SadeSatiSetting
            | Self::KantakShani
            | Self::RahuOverMoon
            | Self::KetuOverMoon => Severity::Moderate,
            Self::JupiterFortune => Severity::HighlyBeneficial,
            Self::JupiterWealth | Self::JupiterIntellect | Self::JupiterGains => {
                Severity::Beneficial
            }
        }
    }

    pub const fn graha(self) -> Graha {
        match self {
            Self::SadeSatiRising
            | Self::SadeSatiPeak
            | Self::SadeSatiSetting
            | Self::AshtamaShani
            | Self::KantakShani => Graha::Shani,
            Self::JupiterWealth
            | Self::JupiterIntellect
            | Self::JupiterFortune
            | Self::JupiterGains => Graha::Guru,
            Self::RahuOverMoon | Self::KetuOverMoon => Graha::Rahu,
        }
    }
}

/// Non-minor transit worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitHighlight {
    pub graha: Graha,
    pub rashi: Rashi,
    pub house_from_moon: u8,
    pub retrograde: bool,
    pub favorable: bool,
    pub obstructed: bool,
    pub significance: Significance,
}

/// Complete transit pillar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitAnalysis {
    pub bodies: Vec<BodyTransit>,
    pub configurations: Vec<TransitConfiguration>,
    pub highlights: Vec<TransitHighlight>,
    pub score: PillarScore,
}

impl TransitAnalysis {
    pub fn body(&self, graha: Graha) -> Option<&BodyTransit> {
        self.bodies.iter().find(|b| b.graha == graha)
    }

    /// Per-body score; neutral for a body without a transit position.
    pub fn body_score(&self, graha: Graha) -> f64 {
        self.body(graha).map_or(NEUTRAL_SCORE, |b| b.score)
    }
}
