//! Pillar synthesizer: combines the three pillars per body and per instant.
//!
//! Per body, the configured pillar weights are renormalized over the pillars
//! that apply to it (a body that rules no period has no dasha score, the
//! nodes have no bindu score). The instant score is a weighted mean of the
//! bodies, with period lords weighing most, adjusted by alignment counts and
//! the dasha-transit resonance.

use dhruv_vedic_base::{ALL_GRAHAS, BeneficNature, DashaLevel, Graha, natural_benefic_malefic};
use tracing::{debug, trace};

use crate::ashtakavarga_pillar::score_ashtakavarga;
use crate::ashtakavarga_types::AshtakavargaAnalysis;
use crate::chart::NatalChart;
use crate::config::SynthesisConfig;
use crate::dasha_pillar::score_dasha;
use crate::dasha_types::DashaAnalysis;
use crate::error::TrayiError;
use crate::score::{NEUTRAL_SCORE, Pillar, PillarScore, clamp_score};
use crate::synthesis_types::{
    ActiveLord, AlignmentState, InstantInputs, PlanetSynthesis, ProbabilityRating,
    SynthesizedPoint,
};
use crate::transit_pillar::score_transit;
use crate::transit_types::TransitAnalysis;

/// Added per body whose three pillars all clear the alignment threshold.
pub const ALIGNED_BODY_BONUS: f64 = 2.0;

/// Weight of the resonance contribution of each dasha level.
const RESONANCE_LEVEL_WEIGHTS: [f64; 3] = [1.0, 0.6, 0.3];

/// Weight of a body in the instant score.
pub const fn instant_weight(graha: Graha, level: Option<DashaLevel>) -> f64 {
    match level {
        Some(DashaLevel::Mahadasha) => 3.0,
        Some(DashaLevel::Antardasha) => 2.5,
        Some(DashaLevel::Pratyantardasha) => 2.0,
        None if graha.is_node() => 0.75,
        None => match natural_benefic_malefic(graha) {
            BeneficNature::Benefic => 1.5,
            BeneficNature::Malefic => 1.0,
        },
    }
}

/// Bonus for a period lord transiting a sign where it has `bav` own and
/// `sav` combined bindus.
pub const fn resonance_bonus(bav: u8, sav: u8) -> f64 {
    if bav >= 5 && sav >= 30 {
        10.0
    } else if bav >= 4 && sav >= 28 {
        7.0
    } else if bav >= 3 && sav >= 25 {
        4.0
    } else if bav <= 2 && sav <= 22 {
        -5.0
    } else {
        0.0
    }
}

/// Level-weighted bindu bonus of the active non-node lords, averaged over
/// the lords that have a transit position.
pub fn dasha_transit_resonance(dasha: &DashaAnalysis, bindus: &AshtakavargaAnalysis) -> f64 {
    let mut total = 0.0;
    let mut counted = 0usize;
    for lord in &dasha.lords {
        if lord.graha.is_node() {
            continue;
        }
        let Some(body) = bindus.body(lord.graha) else {
            continue;
        };
        total += resonance_bonus(body.bav, body.sav)
            * RESONANCE_LEVEL_WEIGHTS[lord.level.index() as usize];
        counted += 1;
    }
    if counted == 0 { 0.0 } else { total / counted as f64 }
}

/// Combine one body's pillar scores. Absent pillars drop out of the
/// weighted sum and count as neutral for alignment.
pub fn synthesize_body(
    graha: Graha,
    level: Option<DashaLevel>,
    dasha: Option<f64>,
    transit: f64,
    ashtakavarga: Option<f64>,
    config: &SynthesisConfig,
) -> PlanetSynthesis {
    let weights = config.weights();
    let parts = [
        (dasha, weights.get(Pillar::Dasha)),
        (Some(transit), weights.get(Pillar::Transit)),
        (ashtakavarga, weights.get(Pillar::Ashtakavarga)),
    ];
    let present = parts.iter().filter_map(|&(s, w)| s.map(|s| (s, w)));
    let total_weight: f64 = present.clone().map(|(_, w)| w).sum();
    let base = if total_weight > 0.0 {
        present.map(|(s, w)| s * w).sum::<f64>() / total_weight
    } else {
        // every applicable pillar weighted zero
        let (sum, n) = present.fold((0.0, 0usize), |(sum, n), (s, _)| (sum + s, n + 1));
        sum / n as f64
    };

    let alignment = AlignmentState::from_scores(
        dasha.unwrap_or(NEUTRAL_SCORE),
        transit,
        ashtakavarga.unwrap_or(NEUTRAL_SCORE),
    );
    PlanetSynthesis {
        graha,
        level,
        dasha,
        transit,
        ashtakavarga,
        alignment,
        score: clamp_score(base + alignment.bonus()),
    }
}

/// Per-body syntheses for every body with a transit position or an active
/// period.
pub fn synthesize_bodies(
    inputs: &InstantInputs<'_>,
    dasha: &DashaAnalysis,
    transit: &TransitAnalysis,
    bindus: &AshtakavargaAnalysis,
    config: &SynthesisConfig,
) -> Vec<PlanetSynthesis> {
    ALL_GRAHAS
        .into_iter()
        .filter_map(|graha| {
            let lord = dasha.lord(graha);
            if inputs.snapshot.get(graha).is_none() && lord.is_none() {
                return None;
            }
            let body = synthesize_body(
                graha,
                lord.map(|l| l.level),
                lord.map(|l| l.score),
                transit.body_score(graha),
                bindus.body_score(graha),
                config,
            );
            trace!(
                graha = graha.name(),
                score = body.score,
                alignment = body.alignment.name(),
                "body synthesized"
            );
            Some(body)
        })
        .collect()
}

/// Instant score from per-body syntheses plus the resonance bonus.
pub fn overall_score(bodies: &[PlanetSynthesis], resonance: f64) -> f64 {
    let total_weight: f64 = bodies.iter().map(|b| instant_weight(b.graha, b.level)).sum();
    if total_weight <= 0.0 {
        return clamp_score(NEUTRAL_SCORE + resonance);
    }
    let mean = bodies
        .iter()
        .map(|b| b.score * instant_weight(b.graha, b.level))
        .sum::<f64>()
        / total_weight;
    let alignment: f64 = bodies
        .iter()
        .map(|b| match b.alignment {
            AlignmentState::AllFavorable => ALIGNED_BODY_BONUS,
            AlignmentState::AllUnfavorable => -ALIGNED_BODY_BONUS,
            _ => 0.0,
        })
        .sum();
    clamp_score(mean + alignment + resonance)
}

/// Score a single pillar at one instant.
pub fn score_pillar(
    pillar: Pillar,
    chart: &NatalChart,
    inputs: &InstantInputs<'_>,
    config: &SynthesisConfig,
) -> Result<PillarScore, TrayiError> {
    Ok(match pillar {
        Pillar::Dasha => score_dasha(chart, inputs.lords, config).score,
        Pillar::Transit => score_transit(chart, inputs.snapshot, config).score,
        Pillar::Ashtakavarga => score_ashtakavarga(chart, inputs.snapshot, inputs.bindus)?.score,
    })
}

/// Synthesize all three pillars at one instant.
pub fn synthesize_point(
    chart: &NatalChart,
    inputs: &InstantInputs<'_>,
    config: &SynthesisConfig,
) -> Result<SynthesizedPoint, TrayiError> {
    let dasha = score_dasha(chart, inputs.lords, config);
    let transit = score_transit(chart, inputs.snapshot, config);
    let bindus = score_ashtakavarga(chart, inputs.snapshot, inputs.bindus)?;

    let bodies = synthesize_bodies(inputs, &dasha, &transit, &bindus, config);
    let resonance = if config.toggles().dasha_transit_resonance {
        dasha_transit_resonance(&dasha, &bindus)
    } else {
        0.0
    };
    let score = overall_score(&bodies, resonance);

    let peak_planets = bodies
        .iter()
        .filter(|b| b.score >= config.peak_threshold())
        .map(|b| b.graha)
        .collect();
    let challenging_planets = bodies
        .iter()
        .filter(|b| b.score <= config.critical_threshold())
        .map(|b| b.graha)
        .collect();
    let alignment =
        AlignmentState::from_scores(dasha.score.value, transit.score.value, bindus.score.value);

    debug!(
        instant = %inputs.instant(),
        score,
        resonance,
        alignment = alignment.name(),
        "instant synthesized"
    );

    Ok(SynthesizedPoint {
        instant: inputs.instant(),
        score,
        rating: ProbabilityRating::from_score(score),
        alignment,
        resonance,
        peak_planets,
        challenging_planets,
        lords: dasha
            .lords
            .iter()
            .map(|l| ActiveLord {
                graha: l.graha,
                level: l.level,
                score: l.score,
                strength: l.strength,
                yogakaraka: l.yogakaraka,
            })
            .collect(),
        highlights: transit.highlights,
        bodies,
        dasha: dasha.score,
        transit: transit.score,
        ashtakavarga: bindus.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{GrahaPosition, PositionSnapshot};
    use crate::config::PillarWeights;
    use crate::error::ProviderError;
    use crate::providers::{BinduTable, RulingLords};
    use chrono::{DateTime, Utc};
    use dhruv_vedic_base::{Rashi, SAPTA_GRAHAS};

    struct Flat(u8, u8);

    impl BinduTable for Flat {
        fn name(&self) -> &'static str {
            "flat"
        }
        fn bindus(&self, _: Graha, _: Rashi) -> Result<u8, ProviderError> {
            Ok(self.0)
        }
        fn combined_bindus(&self, _: Rashi) -> Result<u8, ProviderError> {
            Ok(self.1)
        }
    }

    fn config() -> SynthesisConfig {
        SynthesisConfig::builder()
            .build()
            .unwrap_or_else(|e| panic!("{e}"))
    }

    fn chart() -> NatalChart {
        NatalChart::whole_sign(
            5.0,
            SAPTA_GRAHAS
                .into_iter()
                .enumerate()
                .map(|(i, g)| (g, GrahaPosition::new(i as f64 * 47.0 + 15.0))),
        )
        .unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn instant_weights() {
        assert_eq!(instant_weight(Graha::Surya, Some(DashaLevel::Mahadasha)), 3.0);
        assert_eq!(instant_weight(Graha::Guru, None), 1.5);
        assert_eq!(instant_weight(Graha::Shani, None), 1.0);
        assert_eq!(instant_weight(Graha::Rahu, None), 0.75);
        assert_eq!(instant_weight(Graha::Rahu, Some(DashaLevel::Pratyantardasha)), 2.0);
    }

    #[test]
    fn dasha_weight_redistributed_for_non_lords() {
        let cfg = config();
        let body = synthesize_body(Graha::Guru, None, None, 60.0, Some(40.0), &cfg);
        // 0.35 / 0.30 renormalized
        let expected = (60.0 * 0.35 + 40.0 * 0.30) / 0.65;
        assert!((body.score - expected).abs() < 1e-9);
        assert_eq!(body.alignment, AlignmentState::OneFavorable);
    }

    #[test]
    fn node_without_bindus_uses_two_pillars() {
        let cfg = config();
        let body = synthesize_body(
            Graha::Rahu,
            Some(DashaLevel::Mahadasha),
            Some(80.0),
            70.0,
            None,
            &cfg,
        );
        // neutral bindu pillar keeps it at two favorable
        assert_eq!(body.alignment, AlignmentState::TwoFavorable);
        assert!((body.score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn aligned_body_gets_bonus() {
        let cfg = config();
        let md = Some(DashaLevel::Mahadasha);
        let body = synthesize_body(Graha::Guru, md, Some(60.0), 60.0, Some(60.0), &cfg);
        assert_eq!(body.alignment, AlignmentState::AllFavorable);
        assert!((body.score - 70.0).abs() < 1e-9);

        let body = synthesize_body(Graha::Guru, md, Some(10.0), 20.0, Some(5.0), &cfg);
        assert_eq!(body.alignment, AlignmentState::AllUnfavorable);
        assert!(body.score >= 0.0);
    }

    #[test]
    fn zero_weight_pillars_fall_back_to_mean() {
        let cfg = SynthesisConfig::builder()
            .weights(PillarWeights::new(1.0, 0.0, 0.0))
            .build()
            .unwrap_or_else(|e| panic!("{e}"));
        let body = synthesize_body(Graha::Buddh, None, None, 40.0, Some(60.0), &cfg);
        assert!((body.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn resonance_tiers() {
        assert_eq!(resonance_bonus(5, 30), 10.0);
        assert_eq!(resonance_bonus(4, 28), 7.0);
        assert_eq!(resonance_bonus(3, 25), 4.0);
        assert_eq!(resonance_bonus(2, 22), -5.0);
        assert_eq!(resonance_bonus(3, 22), 0.0);
    }

    #[test]
    fn overall_counts_alignment() {
        let cfg = config();
        let bodies = [
            synthesize_body(Graha::Guru, None, None, 80.0, Some(80.0), &cfg),
            synthesize_body(Graha::Shani, None, None, 20.0, Some(20.0), &cfg),
        ];
        assert_eq!(bodies[0].alignment, AlignmentState::TwoFavorable);
        assert_eq!(bodies[1].alignment, AlignmentState::AllUnfavorable);
        let mean = (bodies[0].score * 1.5 + bodies[1].score * 1.0) / 2.5;
        assert!((overall_score(&bodies, 0.0) - (mean - 2.0)).abs() < 1e-9);
        assert!((overall_score(&bodies, 3.0) - (mean + 1.0)).abs() < 1e-9);
        assert!((overall_score(&[], 0.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn point_carries_lords_and_pillars() {
        let chart = chart();
        let snapshot = ALL_GRAHAS.into_iter().enumerate().fold(
            PositionSnapshot::new(DateTime::<Utc>::default()),
            |s, (i, g)| s.with(g, GrahaPosition::new(i as f64 * 33.0 + 2.0)),
        );
        let lords = RulingLords::from_grahas(&[Graha::Guru, Graha::Shukra]);
        let table = Flat(6, 32);
        let inputs = InstantInputs::new(&snapshot, &lords, &table);
        let point = synthesize_point(&chart, &inputs, &config()).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(point.bodies.len(), 9);
        assert_eq!(point.lords.len(), 2);
        assert_eq!(point.body(Graha::Guru).and_then(|b| b.level), Some(DashaLevel::Mahadasha));
        assert!(point.body(Graha::Rahu).is_some_and(|b| b.ashtakavarga.is_none()));
        // both lords transit excellent signs
        assert!((point.resonance - ((10.0 * 1.0 + 10.0 * 0.6) / 2.0)).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&point.score));
        assert_eq!(point.rating, ProbabilityRating::from_score(point.score));

        let off = SynthesisConfig::builder()
            .dasha_transit_resonance(false)
            .build()
            .unwrap_or_else(|e| panic!("{e}"));
        let plain = synthesize_point(&chart, &inputs, &off).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(plain.resonance, 0.0);
    }

    #[test]
    fn score_pillar_matches_point() {
        let chart = chart();
        let snapshot = PositionSnapshot::new(DateTime::<Utc>::default())
            .with(Graha::Shani, GrahaPosition::new(200.0));
        let lords = RulingLords::empty();
        let table = Flat(1, 20);
        let inputs = InstantInputs::new(&snapshot, &lords, &table);
        let cfg = config();
        let point = synthesize_point(&chart, &inputs, &cfg).unwrap_or_else(|e| panic!("{e}"));
        for (pillar, expected) in [
            (Pillar::Dasha, &point.dasha),
            (Pillar::Transit, &point.transit),
            (Pillar::Ashtakavarga, &point.ashtakavarga),
        ] {
            let score =
                score_pillar(pillar, &chart, &inputs, &cfg).unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(&score, expected);
        }
        assert_eq!(point.dasha.narrative, "No active Dasha");
    }
}
