//! Ashtakavarga pillar: bindu support for each body in its transit sign.
//!
//! Own bindus carry 60 points, combined bindus 30 (saturating at 40) and a
//! favorable kaksha 10. Rahu and Ketu have no tables and are left out.
//!
//! Clean-room implementation from BPHS.

use dhruv_vedic_base::{ALL_GRAHAS, ALL_RASHIS, Bhava, Graha, Rashi, kaksha_of};
use tracing::{debug, trace};

use crate::ashtakavarga_types::{
    AshtakavargaAnalysis, BinduBodyScore, BinduQuality, KakshaSource, PurusharthaTotals,
    STRONG_SIGN_BINDUS, SavDistribution, WEAK_SIGN_BINDUS,
};
use crate::chart::{NatalChart, PositionSnapshot};
use crate::error::TrayiError;
use crate::providers::BinduTable;
use crate::score::{Factor, NEUTRAL_SCORE, Pillar, PillarScore, clamp_score};

/// Combined bindus at which the combined part saturates.
const SAV_SATURATION: f64 = 40.0;

/// Weight of a classical body in the combined score.
pub const fn bindu_weight(graha: Graha) -> f64 {
    match graha {
        Graha::Shani => 1.5,
        Graha::Guru => 1.4,
        Graha::Mangal => 1.0,
        Graha::Surya => 0.9,
        Graha::Shukra => 0.8,
        Graha::Buddh => 0.7,
        Graha::Chandra => 0.5,
        Graha::Rahu | Graha::Ketu => 0.0,
    }
}

/// Combined bindus as a 0..=1 fraction of the saturation point.
pub fn sav_fraction(sav: u8) -> f64 {
    (f64::from(sav) / SAV_SATURATION).min(1.0)
}

/// Score of a body from its bindus and kaksha verdict.
pub fn bindu_score(graha: Graha, bav: u8, sav: u8, kaksha_favorable: bool) -> f64 {
    let mut score = f64::from(bav) / 8.0 * 60.0 + sav_fraction(sav) * 30.0;
    if kaksha_favorable {
        score += 10.0;
    }
    if matches!(graha, Graha::Guru | Graha::Shukra)
        && BinduQuality::classify(bav, sav) == BinduQuality::Excellent
    {
        score *= 1.1;
    }
    if matches!(graha, Graha::Shani | Graha::Mangal) && bav <= 2 && sav <= 22 {
        score *= 0.9;
    }
    clamp_score(score)
}

fn score_body(
    table: &dyn BinduTable,
    graha: Graha,
    longitude: f64,
) -> Result<BinduBodyScore, TrayiError> {
    let rashi = Rashi::from_longitude(longitude);
    let bav = table
        .bindus(graha, rashi)
        .map_err(|e| TrayiError::provider(table.name(), e))?;
    let sav = table
        .combined_bindus(rashi)
        .map_err(|e| TrayiError::provider(table.name(), e))?;
    let kaksha = kaksha_of(longitude);
    let (kaksha_favorable, kaksha_source) = match table.contributes(graha, kaksha.lord, rashi) {
        Some(given) => (given, KakshaSource::Prastara),
        None => (sav >= STRONG_SIGN_BINDUS, KakshaSource::SavFallback),
    };
    let score = bindu_score(graha, bav, sav, kaksha_favorable);
    trace!(graha = graha.name(), bav, sav, kaksha = kaksha.index, score, "bindus read");
    Ok(BinduBodyScore {
        graha,
        rashi,
        bav,
        sav,
        quality: BinduQuality::classify(bav, sav),
        kaksha,
        kaksha_favorable,
        kaksha_source,
        score,
    })
}

/// Nodes have no tables of their own: reported at zero bindus.
fn node_entry(
    table: &dyn BinduTable,
    graha: Graha,
    longitude: f64,
) -> Result<BinduBodyScore, TrayiError> {
    let rashi = Rashi::from_longitude(longitude);
    let sav = table
        .combined_bindus(rashi)
        .map_err(|e| TrayiError::provider(table.name(), e))?;
    Ok(BinduBodyScore {
        graha,
        rashi,
        bav: 0,
        sav,
        quality: BinduQuality::classify(0, sav),
        kaksha: kaksha_of(longitude),
        kaksha_favorable: false,
        kaksha_source: KakshaSource::SavFallback,
        score: 0.0,
    })
}

/// Reporting summary of combined bindus across all twelve signs.
pub fn sav_distribution(
    chart: &NatalChart,
    table: &dyn BinduTable,
) -> Result<SavDistribution, TrayiError> {
    let mut sav = [0u8; 12];
    for rashi in ALL_RASHIS {
        sav[rashi.index() as usize] = table
            .combined_bindus(rashi)
            .map_err(|e| TrayiError::provider(table.name(), e))?;
    }
    let at = |r: Rashi| sav[r.index() as usize];

    let total: u16 = sav.iter().map(|&b| u16::from(b)).sum();
    // first sign wins ties
    let strongest = ALL_RASHIS
        .into_iter()
        .reduce(|best, r| if at(r) > at(best) { r } else { best })
        .unwrap_or(Rashi::Mesha);
    let weakest = ALL_RASHIS
        .into_iter()
        .reduce(|best, r| if at(r) < at(best) { r } else { best })
        .unwrap_or(Rashi::Mesha);

    let mut purusharthas = PurusharthaTotals::default();
    for rashi in ALL_RASHIS {
        let points = u16::from(at(rashi));
        match Bhava::of_rashi(chart.lagna(), rashi).number() % 4 {
            1 => purusharthas.dharma += points,
            2 => purusharthas.artha += points,
            3 => purusharthas.kama += points,
            _ => purusharthas.moksha += points,
        }
    }

    Ok(SavDistribution {
        total,
        average: f64::from(total) / 12.0,
        strongest,
        weakest,
        strong_signs: ALL_RASHIS
            .into_iter()
            .filter(|&r| at(r) >= STRONG_SIGN_BINDUS)
            .collect(),
        weak_signs: ALL_RASHIS
            .into_iter()
            .filter(|&r| at(r) < WEAK_SIGN_BINDUS)
            .collect(),
        purusharthas,
        sodhana_totals: table.sodhana_totals(),
    })
}

fn narrative(bodies: &[BinduBodyScore], distribution: &SavDistribution, score: f64) -> String {
    let quality = match score {
        s if s >= 70.0 => "Favorable",
        s if s >= 55.0 => "Moderately favorable",
        s if s >= 45.0 => "Mixed",
        s if s >= 30.0 => "Challenging",
        _ => "Difficult",
    };
    let mut out = format!("{quality} ashtakavarga support ({score:.1}).");
    let with = |q: BinduQuality| {
        bodies
            .iter()
            .filter(|b| !b.graha.is_node() && b.quality == q)
            .map(|b| b.graha.english_name())
            .collect::<Vec<_>>()
    };
    let strong = with(BinduQuality::Excellent);
    if !strong.is_empty() {
        out.push_str(&format!(" Strong support for {} transits.", strong.join(", ")));
    }
    let weak = with(BinduQuality::Difficult);
    if !weak.is_empty() {
        out.push_str(&format!(" Weak support for {} transits.", weak.join(", ")));
    }
    out.push_str(&format!(
        " Strongest sign: {} ({:.1} average bindus).",
        distribution.strongest.western_name(),
        distribution.average
    ));
    out
}

/// Score the Ashtakavarga pillar for one snapshot.
///
/// Provider failures propagate. With no classical body in the snapshot the
/// pillar is neutral.
pub fn score_ashtakavarga(
    chart: &NatalChart,
    snapshot: &PositionSnapshot,
    table: &dyn BinduTable,
) -> Result<AshtakavargaAnalysis, TrayiError> {
    let mut bodies = Vec::with_capacity(ALL_GRAHAS.len());
    for (graha, p) in snapshot.iter() {
        if graha.is_node() {
            bodies.push(node_entry(table, graha, p.longitude)?);
        } else {
            bodies.push(score_body(table, graha, p.longitude)?);
        }
    }
    let distribution = sav_distribution(chart, table)?;

    let scored = || bodies.iter().filter(|b| !b.graha.is_node());
    let total_weight: f64 = scored().map(|b| bindu_weight(b.graha)).sum();
    let (value, factors) = if total_weight > 0.0 {
        let value = scored()
            .map(|b| b.score * bindu_weight(b.graha))
            .sum::<f64>()
            / total_weight;
        let factors = scored()
            .map(|b| {
                Factor::new(
                    format!(
                        "{} {} ({}/8, {} combined)",
                        b.graha.english_name(),
                        b.quality.name(),
                        b.bav,
                        b.sav
                    ),
                    (b.score - NEUTRAL_SCORE) * bindu_weight(b.graha) / total_weight,
                )
            })
            .collect();
        (clamp_score(value), factors)
    } else {
        debug!("no classical body in snapshot, ashtakavarga pillar neutral");
        (NEUTRAL_SCORE, Vec::new())
    };

    debug!(bodies = bodies.len(), value, "ashtakavarga pillar scored");

    let text = narrative(&bodies, &distribution, value);
    Ok(AshtakavargaAnalysis {
        bodies,
        distribution,
        score: PillarScore::new(Pillar::Ashtakavarga, value, factors, text),
    })
}
