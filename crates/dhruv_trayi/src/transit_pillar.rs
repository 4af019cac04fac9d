//! Transit (gochara) pillar: current positions read from the natal Moon.
//!
//! Each transiting body is classified by its house from the Moon, checked
//! for vedha, adjusted for retrogression and for tight angular aspects to
//! natal bodies, then combined by speed weight. Named Saturn, Jupiter and
//! Rahu configurations scale the result.

use dhruv_vedic_base::{AngularAspect, Bhava, Graha, Rashi, angular_aspect, house_distance};
use tracing::{debug, trace, warn};

use crate::chart::{GrahaPosition, NatalChart, PositionSnapshot};
use crate::config::{FeatureToggles, SynthesisConfig};
use crate::gochara::{GocharaClass, can_obstruct, classify, vedha_house};
use crate::score::{Factor, NEUTRAL_SCORE, Pillar, PillarScore, clamp_score};
use crate::transit_types::{
    BodyTransit, NatalAspect, Severity, Significance, TransitAnalysis, TransitConfiguration,
    TransitHighlight,
};

/// Orb for transit-to-natal aspects, degrees.
pub const NATAL_ASPECT_ORB: f64 = 8.0;
const TIGHT_ORB: f64 = 2.0;

/// Weight of a body in the combined score. Slow movers weigh more.
pub const fn transit_weight(graha: Graha) -> f64 {
    match graha {
        Graha::Shani => 1.5,
        Graha::Guru => 1.4,
        Graha::Rahu | Graha::Ketu => 1.3,
        Graha::Mangal => 1.0,
        Graha::Surya | Graha::Shukra => 0.8,
        Graha::Buddh => 0.7,
        Graha::Chandra => 0.5,
    }
}

const fn is_slow(graha: Graha) -> bool {
    matches!(graha, Graha::Shani | Graha::Guru | Graha::Rahu | Graha::Ketu)
}

fn aspect_delta(transiting: Graha, aspect: AngularAspect) -> f64 {
    match aspect {
        AngularAspect::Conjunction if matches!(transiting, Graha::Guru | Graha::Shukra) => 8.0,
        AngularAspect::Conjunction => -5.0,
        AngularAspect::Opposition => -6.0,
        AngularAspect::Trine => 6.0,
        AngularAspect::Square
            if matches!(
                transiting,
                Graha::Shani | Graha::Mangal | Graha::Rahu | Graha::Ketu
            ) =>
        {
            -8.0
        }
        AngularAspect::Square => -4.0,
    }
}

/// Score before natal aspects.
pub fn base_score(class: GocharaClass, house_from_moon: u8) -> f64 {
    match class {
        GocharaClass::Favorable => 70.0 + 2.0 * f64::from(house_from_moon),
        GocharaClass::Neutral => NEUTRAL_SCORE,
        GocharaClass::Unfavorable if matches!(house_from_moon, 6 | 8 | 12) => 20.0,
        GocharaClass::Unfavorable => 30.0,
    }
}

fn natal_aspects(chart: &NatalChart, graha: Graha, lon: f64) -> Vec<NatalAspect> {
    chart
        .iter()
        .filter_map(|(natal, p)| {
            angular_aspect(lon, p.position.longitude, NATAL_ASPECT_ORB).map(|m| NatalAspect {
                natal,
                aspect: m.aspect,
                orb: m.orb,
                delta: aspect_delta(graha, m.aspect),
            })
        })
        .collect()
}

fn significance(graha: Graha, retrograde: bool, aspects: &[NatalAspect]) -> Significance {
    if is_slow(graha) {
        Significance::Major
    } else if aspects.iter().any(|a| a.orb < TIGHT_ORB)
        || (retrograde && matches!(graha, Graha::Mangal | Graha::Shukra))
    {
        Significance::Significant
    } else if !aspects.is_empty() {
        Significance::Moderate
    } else {
        Significance::Minor
    }
}

/// First other body occupying the vedha house of a favorable position.
fn find_obstructor(
    graha: Graha,
    house_from_moon: u8,
    snapshot: &PositionSnapshot,
    moon_rashi: Rashi,
) -> Option<Graha> {
    let target = vedha_house(graha, house_from_moon)?;
    snapshot
        .iter()
        .filter(|(other, _)| can_obstruct(graha, *other))
        .find(|(_, p)| house_distance(moon_rashi, p.rashi()) == target)
        .map(|(other, _)| other)
}

/// Evaluate one transiting body.
pub fn analyze_body(
    chart: &NatalChart,
    snapshot: &PositionSnapshot,
    graha: Graha,
    position: &GrahaPosition,
    moon_rashi: Rashi,
    toggles: FeatureToggles,
) -> BodyTransit {
    let rashi = position.rashi();
    let house_from_moon = house_distance(moon_rashi, rashi);
    let raw = classify(graha, house_from_moon);

    let obstructed_by = if toggles.vedha_correction && raw == GocharaClass::Favorable {
        find_obstructor(graha, house_from_moon, snapshot, moon_rashi)
    } else {
        None
    };
    let class = match (raw, obstructed_by) {
        (GocharaClass::Favorable, Some(_)) => GocharaClass::Neutral,
        (c, _) => c,
    };

    let mut score = base_score(class, house_from_moon);
    if toggles.retrograde_adjustment && position.retrograde {
        score = match class {
            GocharaClass::Favorable => (score * 1.1).min(100.0),
            GocharaClass::Unfavorable => score * 0.9,
            GocharaClass::Neutral => score,
        };
    }

    let aspects = natal_aspects(chart, graha, position.longitude);
    score = clamp_score(score + aspects.iter().map(|a| a.delta).sum::<f64>());

    trace!(
        graha = graha.name(),
        house_from_moon,
        class = class.name(),
        obstructed = obstructed_by.is_some(),
        score,
        "transit analyzed"
    );

    BodyTransit {
        graha,
        rashi,
        house_from_moon,
        house_from_lagna: Bhava::of_rashi(chart.lagna(), rashi),
        class,
        obstructed_by,
        retrograde: position.retrograde,
        significance: significance(graha, position.retrograde, &aspects),
        aspects,
        score,
    }
}

/// Named configurations present among the analyzed bodies.
pub fn special_configurations(bodies: &[BodyTransit]) -> Vec<TransitConfiguration> {
    let find = |g| bodies.iter().find(|b: &&BodyTransit| b.graha == g);
    let mut out = Vec::new();

    if let Some(saturn) = find(Graha::Shani) {
        let c = match saturn.house_from_moon {
            12 => Some(TransitConfiguration::SadeSatiRising),
            1 => Some(TransitConfiguration::SadeSatiPeak),
            2 => Some(TransitConfiguration::SadeSatiSetting),
            8 => Some(TransitConfiguration::AshtamaShani),
            4 | 7 => Some(TransitConfiguration::KantakShani),
            _ => None,
        };
        out.extend(c);
    }

    if let Some(jupiter) = find(Graha::Guru).filter(|b| b.is_favorable()) {
        let c = match jupiter.house_from_moon {
            2 => Some(TransitConfiguration::JupiterWealth),
            5 => Some(TransitConfiguration::JupiterIntellect),
            9 => Some(TransitConfiguration::JupiterFortune),
            11 => Some(TransitConfiguration::JupiterGains),
            _ => None,
        };
        out.extend(c);
    }

    if let Some(rahu) = find(Graha::Rahu) {
        let c = match rahu.house_from_moon {
            1 => Some(TransitConfiguration::RahuOverMoon),
            7 => Some(TransitConfiguration::KetuOverMoon),
            _ => None,
        };
        out.extend(c);
    }

    out
}

fn narrative(bodies: &[BodyTransit], configs: &[TransitConfiguration], score: f64) -> String {
    let quality = match score {
        s if s >= 70.0 => "Favorable",
        s if s >= 55.0 => "Moderately favorable",
        s if s >= 45.0 => "Mixed",
        s if s >= 30.0 => "Challenging",
        _ => "Difficult",
    };
    let mut out = format!("{quality} transit period.");

    let names = |pred: &dyn Fn(&BodyTransit) -> bool| {
        bodies
            .iter()
            .filter(|b| pred(b))
            .map(|b| b.graha.english_name())
            .collect::<Vec<_>>()
    };
    let favorable = names(&|b| b.is_favorable());
    if !favorable.is_empty() {
        out.push_str(&format!(" Favorable transits from {}.", favorable.join(", ")));
    }
    let challenging = names(&|b| !b.is_favorable() && b.score < 40.0);
    if !challenging.is_empty() {
        out.push_str(&format!(" Challenging transits from {}.", challenging.join(", ")));
    }

    for c in configs {
        match c.severity() {
            Severity::Severe => out.push_str(&format!(" Alert: {}.", c.name())),
            Severity::HighlyBeneficial => out.push_str(&format!(" Opportunity: {}.", c.name())),
            _ => {}
        }
    }
    out
}

/// Score the transit pillar for one snapshot.
///
/// Without a natal Moon the pillar is neutral.
pub fn score_transit(
    chart: &NatalChart,
    snapshot: &PositionSnapshot,
    config: &SynthesisConfig,
) -> TransitAnalysis {
    let Some(moon_rashi) = chart.moon_rashi() else {
        warn!("natal Moon missing, transit pillar neutral");
        return TransitAnalysis {
            bodies: Vec::new(),
            configurations: Vec::new(),
            highlights: Vec::new(),
            score: PillarScore::neutral(Pillar::Transit, "Natal Moon position not available"),
        };
    };

    let toggles = config.toggles();
    let bodies: Vec<BodyTransit> = snapshot
        .iter()
        .map(|(g, p)| analyze_body(chart, snapshot, g, p, moon_rashi, toggles))
        .collect();

    if bodies.len() < dhruv_vedic_base::ALL_GRAHAS.len() {
        debug!(
            present = bodies.len(),
            "transit snapshot lacks some bodies, they score neutral"
        );
    }

    let total_weight: f64 = bodies.iter().map(|b| transit_weight(b.graha)).sum();
    let composite = if total_weight > 0.0 {
        bodies
            .iter()
            .map(|b| b.score * transit_weight(b.graha))
            .sum::<f64>()
            / total_weight
    } else {
        NEUTRAL_SCORE
    };

    let mut factors: Vec<Factor> = bodies
        .iter()
        .map(|b| {
            let share = transit_weight(b.graha) / total_weight;
            Factor::new(
                format!("{} in {} from Moon", b.graha.english_name(), b.house_from_moon),
                (b.score - NEUTRAL_SCORE) * share,
            )
        })
        .collect();

    let configurations = special_configurations(&bodies);
    let mut value = clamp_score(composite);
    for c in &configurations {
        let next = value * c.multiplier();
        factors.push(Factor::new(c.name(), next - value));
        value = next;
    }
    let value = clamp_score(value);

    let highlights = bodies
        .iter()
        .filter(|b| b.significance != Significance::Minor)
        .map(|b| TransitHighlight {
            graha: b.graha,
            rashi: b.rashi,
            house_from_moon: b.house_from_moon,
            retrograde: b.retrograde,
            favorable: b.is_favorable(),
            obstructed: b.obstructed_by.is_some(),
            significance: b.significance,
        })
        .collect();

    debug!(
        bodies = bodies.len(),
        composite,
        configurations = configurations.len(),
        value,
        "transit pillar scored"
    );

    let text = narrative(&bodies, &configurations, value);
    TransitAnalysis {
        bodies,
        configurations,
        highlights,
        score: PillarScore::new(Pillar::Transit, value, factors, text),
    }
}
