//! Dasha pillar: natal strength of the active period lords.
//!
//! Each lord gets a base score from five parts:
//! - dignity of its natal placement
//! - category of the natal house
//! - houses it rules from the lagna
//! - whole-sign aspects it receives
//! - special conditions (combustion, retrogression, war, vargottama)
//!
//! The lord scores are blended outermost-first (50/35/15) and multiplied
//! by a combination modifier read from the relationship of the lords.
//!
//! Clean-room implementation from BPHS.

use dhruv_vedic_base::{
    Bhava, DashaLevel, Dignity, Graha, MutualRelation, angular_separation, aspects_rashi,
    dignity_in_rashi, houses_ruled_by, is_combust, is_vargottama, mutual_aspect,
    mutual_relation, yogakaraka,
};
use tracing::{debug, trace};

use crate::chart::{NatalChart, NatalPlacement};
use crate::config::{FeatureToggles, SynthesisConfig};
use crate::dasha_types::{
    CombinationSummary, DashaAnalysis, DashaCombination, LordAnalysis, LordPlacement, LordPoints,
    LordStrength,
};
use crate::providers::RulingLords;
use crate::score::{Factor, NEUTRAL_SCORE, Pillar, PillarScore, ScoreBucket, clamp_score};

/// Blend weight of each level, outermost first.
pub const LEVEL_WEIGHTS: [f64; 3] = [0.50, 0.35, 0.15];

const YOGAKARAKA_MULTIPLIER: f64 = 1.15;
const WAR_ORB: f64 = 1.0;

// ---------------------------------------------------------------------------
// Point tables
// ---------------------------------------------------------------------------

pub const fn dignity_points(dignity: Dignity) -> f64 {
    match dignity {
        Dignity::Exalted => 75.0,
        Dignity::Moolatrikone => 67.5,
        Dignity::OwnSign => 60.0,
        Dignity::Mitra => 45.0,
        Dignity::Sama => 30.0,
        Dignity::Shatru => 15.0,
        Dignity::Debilitated => 0.0,
    }
}

/// Points for the natal house. The lagna counts as a kendra.
pub const fn house_points(house: Bhava) -> f64 {
    match house.number() {
        1 | 4 | 7 | 10 => 18.0,
        5 | 9 => 20.0,
        11 => 15.0,
        2 => 14.0,
        3 => 12.0,
        6 => 8.0,
        8 => 4.0,
        _ => 5.0,
    }
}

const fn ruled_house_points(house: Bhava) -> f64 {
    match house.number() {
        1 | 5 | 9 => 10.0,
        4 | 7 | 10 => 8.0,
        11 => 6.0,
        2 => 5.0,
        3 => 3.0,
        6 => -2.0,
        8 => -5.0,
        _ => -3.0,
    }
}

/// Sum over every ruled house, clamped to [-10, 30].
pub fn lordship_points(ruled: &[Bhava]) -> f64 {
    ruled
        .iter()
        .map(|&h| ruled_house_points(h))
        .sum::<f64>()
        .clamp(-10.0, 30.0)
}

/// Value of a whole-sign aspect cast by `aspecting`.
pub const fn aspect_points(aspecting: Graha) -> f64 {
    match aspecting {
        Graha::Guru => 8.0,
        Graha::Shukra => 5.0,
        Graha::Buddh => 3.0,
        Graha::Chandra => 2.0,
        Graha::Surya => 0.0,
        Graha::Mangal => -4.0,
        Graha::Shani => -5.0,
        Graha::Rahu => -6.0,
        Graha::Ketu => -4.0,
    }
}

const fn war_eligible(graha: Graha) -> bool {
    matches!(
        graha,
        Graha::Mangal | Graha::Buddh | Graha::Guru | Graha::Shukra | Graha::Shani
    )
}

// ---------------------------------------------------------------------------
// Single lord
// ---------------------------------------------------------------------------

fn neutral_analysis(graha: Graha, level: DashaLevel) -> LordAnalysis {
    LordAnalysis {
        graha,
        level,
        placement: None,
        ruled_houses: Vec::new(),
        aspected_by: Vec::new(),
        conditions: Vec::new(),
        points: LordPoints::default(),
        yogakaraka: false,
        score: NEUTRAL_SCORE,
        strength: LordStrength::Moderate,
    }
}

/// Natal bodies whose whole-sign drishti falls on the lord's rashi.
fn aspecting_grahas(chart: &NatalChart, graha: Graha, placement: &NatalPlacement) -> Vec<Graha> {
    chart
        .iter()
        .filter(|(other, p)| *other != graha && aspects_rashi(*other, p.rashi, placement.rashi))
        .map(|(other, _)| other)
        .collect()
}

fn special_conditions(
    chart: &NatalChart,
    graha: Graha,
    placement: &NatalPlacement,
    toggles: FeatureToggles,
) -> Vec<Factor> {
    let lon = placement.position.longitude;
    let mut conditions = Vec::new();

    if toggles.combustion_adjustment {
        if let Some(sun) = chart.placement(Graha::Surya) {
            let sun_lon = sun.position.longitude;
            if is_combust(graha, lon, sun_lon, placement.position.retrograde) {
                let sep = angular_separation(lon, sun_lon);
                conditions.push(Factor::new(format!("Combust ({sep:.1}° from Sun)"), -10.0));
            }
        }
    }

    if placement.position.retrograde && !graha.is_node() {
        conditions.push(Factor::new("Retrograde", 5.0));
    }

    if war_eligible(graha) {
        let opponent = chart
            .iter()
            .filter(|(other, _)| *other != graha && war_eligible(*other))
            .map(|(other, p)| (other, p, angular_separation(lon, p.position.longitude)))
            .filter(|(_, _, sep)| *sep < WAR_ORB)
            .min_by(|a, b| a.2.total_cmp(&b.2));
        if let Some((other, p, _)) = opponent {
            if lon > p.position.longitude {
                conditions.push(Factor::new(
                    format!("Wins planetary war with {}", other.english_name()),
                    8.0,
                ));
            } else {
                conditions.push(Factor::new(
                    format!("Loses planetary war to {}", other.english_name()),
                    -10.0,
                ));
            }
        }
    }

    if is_vargottama(lon) {
        conditions.push(Factor::new("Vargottama", 12.0));
    }

    conditions
}

/// Score one dasha lord from its natal placement.
///
/// A lord absent from the chart gets a neutral analysis (score 50).
pub fn analyze_lord(
    chart: &NatalChart,
    graha: Graha,
    level: DashaLevel,
    toggles: FeatureToggles,
) -> LordAnalysis {
    let Some(placement) = chart.placement(graha) else {
        debug!(graha = graha.name(), level = level.name(), "dasha lord absent from chart");
        return neutral_analysis(graha, level);
    };

    let lagna = chart.lagna();
    let dignity = dignity_in_rashi(graha, placement.position.longitude);
    let ruled_houses = houses_ruled_by(graha, lagna);
    let aspected_by = aspecting_grahas(chart, graha, placement);
    let conditions = special_conditions(chart, graha, placement, toggles);

    let points = LordPoints {
        dignity: dignity_points(dignity),
        house: house_points(placement.house),
        lordship: lordship_points(&ruled_houses),
        aspects: aspected_by
            .iter()
            .map(|&g| aspect_points(g))
            .sum::<f64>()
            .clamp(-20.0, 20.0),
        special: conditions.iter().map(|f| f.delta).sum(),
    };

    let is_yogakaraka = yogakaraka(lagna) == Some(graha);
    let mut score = clamp_score(points.total());
    if is_yogakaraka {
        score = (score * YOGAKARAKA_MULTIPLIER).min(100.0);
    }
    let strength = LordStrength::classify(score, dignity, placement.house);

    trace!(
        graha = graha.name(),
        level = level.name(),
        dignity = dignity.name(),
        house = placement.house.number(),
        score,
        "dasha lord analyzed"
    );

    LordAnalysis {
        graha,
        level,
        placement: Some(LordPlacement {
            rashi: placement.rashi,
            house: placement.house,
            dignity,
        }),
        ruled_houses,
        aspected_by,
        conditions,
        points,
        yogakaraka: is_yogakaraka,
        score,
        strength,
    }
}

// ---------------------------------------------------------------------------
// Combination
// ---------------------------------------------------------------------------

/// Combination modifier for lords given outermost first.
///
/// Needs both a Mahadasha and an Antardasha lord; otherwise a single-lord
/// combination with modifier 1.0.
pub fn combination_modifier(lords: &[LordAnalysis]) -> DashaCombination {
    let find = |level| lords.iter().find(|l| l.level == level);
    let (Some(md), Some(ad)) = (find(DashaLevel::Mahadasha), find(DashaLevel::Antardasha)) else {
        return DashaCombination::single();
    };

    let mut modifier = 1.0;
    let mut notes = Vec::new();
    let pair = format!("{}-{}", md.graha.english_name(), ad.graha.english_name());

    match mutual_relation(md.graha, ad.graha) {
        MutualRelation::MutualFriends => {
            modifier *= 1.15;
            notes.push(format!("{pair}: mutual friends"));
        }
        MutualRelation::OneSidedFriend => {
            modifier *= 1.08;
            notes.push(format!("{pair}: friendly"));
        }
        MutualRelation::Inimical => {
            modifier *= 0.85;
            notes.push(format!("{pair}: enemies"));
        }
        MutualRelation::Neutral => {}
    }

    if let (Some(mp), Some(ap)) = (md.placement, ad.placement) {
        let diff = mp.house.number().abs_diff(ap.house.number());
        if matches!(diff, 0 | 3 | 6 | 9) {
            modifier *= 1.05;
            notes.push("Dasha lords in angular relationship".into());
        }
        if mutual_aspect(md.graha, mp.rashi, ad.graha, ap.rashi) {
            modifier *= 1.10;
            notes.push("Mutual aspect between dasha lords".into());
        }
    }

    let pd_friendly = find(DashaLevel::Pratyantardasha).is_some_and(|pd| {
        matches!(
            mutual_relation(ad.graha, pd.graha),
            MutualRelation::MutualFriends | MutualRelation::OneSidedFriend
        )
    });
    if pd_friendly {
        modifier *= 1.05;
        notes.push("Antardasha and Pratyantardasha lords are friendly".into());
    }

    DashaCombination {
        modifier,
        summary: CombinationSummary::from_modifier(modifier),
        notes,
    }
}

// ---------------------------------------------------------------------------
// Pillar
// ---------------------------------------------------------------------------

fn narrative(lords: &[LordAnalysis], combination: &DashaCombination, score: f64) -> String {
    let mut out = format!("{} dasha period.", ScoreBucket::from_score(score).name());
    for lord in lords {
        out.push_str(&format!(
            " {} {} ({}).",
            lord.graha.english_name(),
            lord.level.name(),
            lord.strength.name()
        ));
        if lord.yogakaraka {
            out.push_str(&format!(" {} is yogakaraka.", lord.graha.english_name()));
        }
    }
    out.push(' ');
    out.push_str(combination.summary.name());
    out.push('.');
    out
}

/// Score the dasha pillar for the active lords.
///
/// Levels within the configured depth without a lord count as neutral 50;
/// deeper levels are dropped and the remaining weights renormalized.
pub fn score_dasha(
    chart: &NatalChart,
    ruling: &RulingLords,
    config: &SynthesisConfig,
) -> DashaAnalysis {
    let ruling = ruling.within_depth(config.sub_period_depth());
    if ruling.is_empty() {
        debug!("no active dasha lord");
        return DashaAnalysis {
            lords: Vec::new(),
            combination: None,
            score: PillarScore::neutral(Pillar::Dasha, "No active Dasha"),
        };
    }

    let toggles = config.toggles();
    let lords: Vec<LordAnalysis> = ruling
        .iter()
        .map(|l| analyze_lord(chart, l.graha, l.level, toggles))
        .collect();

    let levels = dhruv_vedic_base::ALL_DASHA_LEVELS
        .into_iter()
        .filter(|lvl| lvl.within_depth(config.sub_period_depth()));
    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    let mut parts = Vec::new();
    for level in levels {
        let w = LEVEL_WEIGHTS[level.index() as usize];
        let (label, s) = match lords.iter().find(|l| l.level == level) {
            Some(l) => (format!("{} {}", l.graha.english_name(), level.name()), l.score),
            None => (format!("No {} lord", level.name()), NEUTRAL_SCORE),
        };
        weighted += s * w;
        weight_sum += w;
        parts.push((label, s, w));
    }
    let base = if weight_sum > 0.0 {
        weighted / weight_sum
    } else {
        NEUTRAL_SCORE
    };

    let mut factors: Vec<Factor> = parts
        .into_iter()
        .map(|(label, s, w)| Factor::new(label, (s - NEUTRAL_SCORE) * w / weight_sum))
        .collect();

    let combination = combination_modifier(&lords);
    let value = clamp_score(base * combination.modifier);
    if (combination.modifier - 1.0).abs() > f64::EPSILON {
        factors.push(Factor::new(
            combination.summary.name(),
            base * combination.modifier - base,
        ));
    }

    debug!(
        lords = lords.len(),
        base,
        modifier = combination.modifier,
        value,
        "dasha pillar scored"
    );

    let text = narrative(&lords, &combination, value);
    DashaAnalysis {
        lords,
        combination: Some(combination),
        score: PillarScore::new(Pillar::Dasha, value, factors, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::GrahaPosition;
    use crate::providers::RulingLord;

    fn chart(entries: &[(Graha, f64)]) -> NatalChart {
        NatalChart::whole_sign(
            215.0,
            entries.iter().map(|&(g, lon)| (g, GrahaPosition::new(lon))),
        )
        .unwrap_or_else(|e| panic!("{e}"))
    }

    fn config(depth: u8) -> SynthesisConfig {
        SynthesisConfig::builder()
            .sub_period_depth(depth)
            .build()
            .unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn point_tables() {
        assert!((dignity_points(Dignity::Moolatrikone) - 67.5).abs() < 1e-12);
        let h = |n| Bhava::new(n).unwrap_or_else(|e| panic!("{e}"));
        assert!((house_points(h(1)) - 18.0).abs() < 1e-12);
        assert!((house_points(h(9)) - 20.0).abs() < 1e-12);
        assert!((house_points(h(12)) - 5.0).abs() < 1e-12);
        assert!((lordship_points(&[h(1), h(5), h(9), h(4)]) - 30.0).abs() < 1e-12);
        assert!((lordship_points(&[h(6), h(8), h(12)]) + 10.0).abs() < 1e-12);
    }

    #[test]
    fn exalted_jupiter_in_ninth() {
        let c = chart(&[(Graha::Guru, 95.0), (Graha::Surya, 300.0)]);
        let a = analyze_lord(&c, Graha::Guru, DashaLevel::Mahadasha, FeatureToggles::default());
        let p = a.placement.unwrap_or_else(|| panic!("placed"));
        assert_eq!(p.dignity, Dignity::Exalted);
        assert_eq!(p.house.number(), 9);
        // rules Dhanu (2nd) and Meena (5th) from a Vrischika lagna
        assert!((a.points.lordship - 15.0).abs() < 1e-12);
        assert!(a.score >= 80.0);
        assert_eq!(a.strength, LordStrength::VeryStrong);
    }

    #[test]
    fn absent_lord_is_neutral() {
        let c = chart(&[(Graha::Guru, 95.0)]);
        let a = analyze_lord(&c, Graha::Shani, DashaLevel::Antardasha, FeatureToggles::default());
        assert!(a.placement.is_none());
        assert!((a.score - 50.0).abs() < 1e-12);
        assert_eq!(a.strength, LordStrength::Moderate);
    }

    #[test]
    fn combustion_follows_toggle() {
        // Saturn 5° from the Sun
        let c = chart(&[(Graha::Shani, 205.0), (Graha::Surya, 200.0)]);
        let on = analyze_lord(&c, Graha::Shani, DashaLevel::Mahadasha, FeatureToggles::default());
        assert!(on.conditions.iter().any(|f| f.label.starts_with("Combust")));
        let toggles = FeatureToggles {
            combustion_adjustment: false,
            ..FeatureToggles::default()
        };
        let off = analyze_lord(&c, Graha::Shani, DashaLevel::Mahadasha, toggles);
        assert!(off.conditions.iter().all(|f| !f.label.starts_with("Combust")));
        assert!((on.points.special - off.points.special + 10.0).abs() < 1e-12);
    }

    #[test]
    fn planetary_war_by_longitude() {
        let c = chart(&[(Graha::Mangal, 100.5), (Graha::Shukra, 100.0)]);
        let toggles = FeatureToggles::default();
        let mars = analyze_lord(&c, Graha::Mangal, DashaLevel::Mahadasha, toggles);
        let venus = analyze_lord(&c, Graha::Shukra, DashaLevel::Mahadasha, toggles);
        assert!(mars.conditions.iter().any(|f| f.label.starts_with("Wins") && f.delta > 0.0));
        assert!(venus.conditions.iter().any(|f| f.label.starts_with("Loses") && f.delta < 0.0));
    }

    #[test]
    fn retrograde_node_gets_no_bonus() {
        let c = NatalChart::whole_sign(0.0, [(Graha::Rahu, GrahaPosition::new(50.0).retrograde())])
            .unwrap_or_else(|e| panic!("{e}"));
        let a = analyze_lord(&c, Graha::Rahu, DashaLevel::Mahadasha, FeatureToggles::default());
        assert!(a.conditions.iter().all(|f| f.label != "Retrograde"));
    }

    #[test]
    fn yogakaraka_multiplier() {
        // Moon is yogakaraka for a Vrischika lagna
        let c = chart(&[(Graha::Chandra, 200.0)]);
        let a = analyze_lord(&c, Graha::Chandra, DashaLevel::Mahadasha, FeatureToggles::default());
        assert!(a.yogakaraka);
        let expected = (clamp_score(a.points.total()) * 1.15).min(100.0);
        assert!((a.score - expected).abs() < 1e-9);
    }

    #[test]
    fn no_active_dasha_is_neutral() {
        let c = chart(&[(Graha::Guru, 95.0)]);
        let out = score_dasha(&c, &RulingLords::empty(), &SynthesisConfig::default());
        assert!((out.score.value - 50.0).abs() < 1e-12);
        assert_eq!(out.score.narrative, "No active Dasha");
        assert!(out.combination.is_none());
    }

    #[test]
    fn sole_outer_lord_at_depth_one() {
        let c = chart(&[(Graha::Guru, 95.0), (Graha::Surya, 300.0)]);
        let lords = RulingLords::from_grahas(&[Graha::Guru]);
        let out = score_dasha(&c, &lords, &config(1));
        assert!(out.score.value >= 80.0);
        assert_eq!(out.score.bucket, ScoreBucket::Excellent);
    }

    #[test]
    fn missing_levels_default_to_neutral() {
        let c = chart(&[(Graha::Guru, 95.0), (Graha::Surya, 300.0)]);
        let lords = RulingLords::from_grahas(&[Graha::Guru]);
        let out = score_dasha(&c, &lords, &config(3));
        let jupiter = out.lord(Graha::Guru).map_or(0.0, |l| l.score);
        let expected = jupiter * 0.5 + 50.0 * 0.5;
        assert!((out.score.value - expected).abs() < 1e-9);
    }

    #[test]
    fn enemies_reduce_combination() {
        let c = chart(&[(Graha::Surya, 10.0), (Graha::Shani, 130.0)]);
        let lords = RulingLords::new([
            RulingLord {
                level: DashaLevel::Mahadasha,
                graha: Graha::Surya,
            },
            RulingLord {
                level: DashaLevel::Antardasha,
                graha: Graha::Shani,
            },
        ]);
        let analyses: Vec<_> = lords
            .iter()
            .map(|l| analyze_lord(&c, l.graha, l.level, FeatureToggles::default()))
            .collect();
        let combo = combination_modifier(&analyses);
        // houses 6 and 10 apart by 4, signs Mesha and Simha in trine
        assert!((combo.modifier - 0.85).abs() < 1e-12);
        assert_eq!(combo.summary, CombinationSummary::Challenging);
    }

    #[test]
    fn single_lord_combination() {
        let combo = combination_modifier(&[]);
        assert!((combo.modifier - 1.0).abs() < 1e-12);
    }
}
