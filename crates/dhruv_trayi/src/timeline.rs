//! Timeline analysis over a sequence of synthesized points.
//!
//! Sampling picks the instants, the engine synthesizes them, and this module
//! turns the time-ordered result into peak windows, critical periods, a
//! trend, statistics and monthly averages in one sequential pass per
//! detector.

use chrono::{DateTime, Datelike, TimeDelta, Utc, Weekday};
use dhruv_vedic_base::{ALL_GRAHAS, Graha};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::{Sampling, SynthesisConfig};
use crate::dasha_types::LordStrength;
use crate::error::TrayiError;
use crate::life_area::{ALL_LIFE_AREAS, LifeArea};
use crate::score::{NEUTRAL_SCORE, Pillar};
use crate::synthesis_types::SynthesizedPoint;
use crate::timeline_types::{
    CriticalPeriod, PeakWindow, RunKind, Sample, Timeline, TimelineQuality, TimelineStatistics,
    Trend, WindowSpan,
};
use crate::transit_types::Significance;

/// Upper bound on the number of sampled instants in one timeline.
pub const MAX_TIMELINE_POINTS: usize = 100_000;

/// Score standard deviation above which a timeline is volatile.
const VOLATILITY_LIMIT: f64 = 15.0;
/// Pillar score under which a pillar is named as a challenge.
const CHALLENGE_LEVEL: f64 = 40.0;
const DOMINANT_PLANETS: usize = 3;
const MAX_RECOMMENDATIONS: usize = 5;

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Sampling interval for a range length.
pub fn adaptive_interval(range: TimeDelta) -> TimeDelta {
    let days = range.num_seconds() as f64 / 86_400.0;
    if days <= 7.0 {
        TimeDelta::hours(6)
    } else if days <= 31.0 {
        TimeDelta::hours(12)
    } else if days <= 180.0 {
        TimeDelta::days(1)
    } else if days <= 730.0 {
        TimeDelta::days(3)
    } else {
        TimeDelta::days(7)
    }
}

pub fn sampling_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    sampling: Sampling,
) -> TimeDelta {
    match sampling {
        Sampling::Adaptive => adaptive_interval(end - start),
        Sampling::Fixed(interval) => interval,
    }
}

/// Instants from `start` to `end` inclusive, one interval apart.
pub fn sample_instants(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: TimeDelta,
) -> Result<Vec<DateTime<Utc>>, TrayiError> {
    if start >= end {
        return Err(TrayiError::InvalidRange { start, end });
    }
    let step = interval.num_seconds().max(1);
    let span = (end - start).num_seconds();
    let requested = usize::try_from(span / step)
        .unwrap_or(usize::MAX)
        .saturating_add(1);
    if requested > MAX_TIMELINE_POINTS {
        return Err(TrayiError::TooManySamples {
            requested,
            max: MAX_TIMELINE_POINTS,
        });
    }
    Ok((0..requested as i64)
        .map(|i| start + TimeDelta::seconds(i * step))
        .collect())
}

// ---------------------------------------------------------------------------
// Window detection
// ---------------------------------------------------------------------------

struct OpenRun {
    first: usize,
    extremum: usize,
    sum: f64,
}

fn close_run(
    samples: &[Sample],
    run: OpenRun,
    last: usize,
    min_duration: TimeDelta,
) -> Option<WindowSpan> {
    let start = samples[run.first].instant;
    let end = samples[last].instant;
    if end - start < min_duration {
        return None;
    }
    Some(WindowSpan {
        start,
        end,
        first: run.first,
        last,
        extremum_at: samples[run.extremum].instant,
        extremum: samples[run.extremum].score,
        average: run.sum / (last - run.first + 1) as f64,
    })
}

/// Maximal runs of samples past `threshold`, in time order.
///
/// A run opens on the first admitted sample, tracks its extremum while
/// samples stay admitted and closes on the first sample back across or at
/// the end. Runs spanning less than `min_duration` are dropped.
pub fn detect_runs(
    samples: &[Sample],
    kind: RunKind,
    threshold: f64,
    min_duration: TimeDelta,
) -> Vec<WindowSpan> {
    let mut out = Vec::new();
    let mut open: Option<OpenRun> = None;
    for (i, sample) in samples.iter().enumerate() {
        let admitted = kind.admits(sample.score, threshold);
        open = match (open.take(), admitted) {
            (None, true) => Some(OpenRun {
                first: i,
                extremum: i,
                sum: sample.score,
            }),
            (Some(mut run), true) => {
                if kind.beats(sample.score, samples[run.extremum].score) {
                    run.extremum = i;
                }
                run.sum += sample.score;
                Some(run)
            }
            (Some(run), false) => {
                out.extend(close_run(samples, run, i - 1, min_duration));
                None
            }
            (None, false) => None,
        };
    }
    if let Some(run) = open {
        out.extend(close_run(samples, run, samples.len() - 1, min_duration));
    }
    out
}

// ---------------------------------------------------------------------------
// Trend and statistics
// ---------------------------------------------------------------------------

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Population standard deviation of the scores.
pub fn volatility(scores: &[f64]) -> f64 {
    std_dev(scores)
}

/// Classify the direction of a score sequence.
///
/// Compares the mean of the first and last quarters (at least one score
/// each). A score spread above 15 overrides any direction.
pub fn classify_trend(scores: &[f64]) -> Trend {
    if scores.is_empty() {
        return Trend::StableNeutral;
    }
    if volatility(scores) > VOLATILITY_LIMIT {
        return Trend::Volatile;
    }
    let quarter = (scores.len() / 4).max(1);
    let delta = mean(&scores[scores.len() - quarter..]) - mean(&scores[..quarter]);
    match delta {
        d if d >= 10.0 => Trend::StronglyImproving,
        d if d >= 4.0 => Trend::Improving,
        d if d <= -10.0 => Trend::StronglyDeclining,
        d if d <= -4.0 => Trend::Declining,
        _ => match mean(scores) {
            m if m >= 60.0 => Trend::StablePositive,
            m if m <= 40.0 => Trend::StableNegative,
            _ => Trend::StableNeutral,
        },
    }
}

pub fn timeline_quality(average: f64, peak_windows: usize) -> TimelineQuality {
    match average {
        a if a >= 70.0 && peak_windows >= 2 => TimelineQuality::VeryFavorable,
        a if a >= 55.0 => TimelineQuality::Favorable,
        a if a >= 45.0 => TimelineQuality::Mixed,
        a if a >= 35.0 => TimelineQuality::Challenging,
        _ => TimelineQuality::VeryChallenging,
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Aggregate statistics; `None` for an empty sequence.
pub fn timeline_statistics(samples: &[Sample], peak_windows: usize) -> Option<TimelineStatistics> {
    let first = *samples.first()?;
    let scores: Vec<f64> = samples.iter().map(|s| s.score).collect();
    let average = mean(&scores);

    // first occurrence wins ties
    let best = samples
        .iter()
        .fold(first, |b, s| if s.score > b.score { *s } else { b });
    let worst = samples
        .iter()
        .fold(first, |w, s| if s.score < w.score { *s } else { w });

    let mut by_day = [(0.0, 0usize); 7];
    for s in samples {
        let slot = &mut by_day[s.instant.weekday().num_days_from_monday() as usize];
        slot.0 += s.score;
        slot.1 += 1;
    }
    let best_weekday = WEEKDAYS
        .into_iter()
        .zip(by_day)
        .filter(|(_, (_, n))| *n > 0)
        .map(|(day, (sum, n))| (day, sum / n as f64))
        .fold(None::<(Weekday, f64)>, |best, (day, avg)| match best {
            Some((_, b)) if b >= avg => best,
            _ => Some((day, avg)),
        })
        .map_or(first.instant.weekday(), |(day, _)| day);

    Some(TimelineStatistics {
        average,
        volatility: volatility(&scores),
        best,
        worst,
        best_weekday,
        quality: timeline_quality(average, peak_windows),
    })
}

/// Mean score per calendar month, keyed `YYYY-MM`, in first-seen order.
pub fn monthly_averages(samples: &[Sample]) -> IndexMap<String, f64> {
    let mut acc: IndexMap<String, (f64, usize)> = IndexMap::new();
    for s in samples {
        let slot = acc
            .entry(s.instant.format("%Y-%m").to_string())
            .or_insert((0.0, 0));
        slot.0 += s.score;
        slot.1 += 1;
    }
    acc.into_iter()
        .map(|(month, (sum, n))| (month, sum / n as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Window details
// ---------------------------------------------------------------------------

/// Most frequent planets, highest count first, graha order on ties.
fn most_frequent<'a>(lists: impl Iterator<Item = &'a [Graha]>) -> Vec<Graha> {
    let mut counts = [0usize; 9];
    for list in lists {
        for g in list {
            counts[g.index() as usize] += 1;
        }
    }
    let mut ranked: Vec<Graha> = ALL_GRAHAS
        .into_iter()
        .filter(|g| counts[g.index() as usize] > 0)
        .collect();
    ranked.sort_by_key(|g| std::cmp::Reverse(counts[g.index() as usize]));
    ranked.truncate(DOMINANT_PLANETS);
    ranked
}

fn push_unique(out: &mut Vec<String>, item: String) {
    if !out.contains(&item) {
        out.push(item);
    }
}

fn extremum_point<'a>(
    points: &'a [SynthesizedPoint],
    span: &WindowSpan,
) -> Option<&'a SynthesizedPoint> {
    points.iter().find(|p| p.instant == span.extremum_at)
}

/// Peak window details from its member points.
pub fn peak_window(points: &[SynthesizedPoint], span: WindowSpan) -> PeakWindow {
    let dominant_planets = most_frequent(points.iter().map(|p| p.peak_planets.as_slice()));

    let mut supporting_factors = Vec::new();
    if let Some(best) = extremum_point(points, &span) {
        for lord in &best.lords {
            if matches!(lord.strength, LordStrength::Strong | LordStrength::VeryStrong) {
                push_unique(
                    &mut supporting_factors,
                    format!("Strong {} {} period", lord.graha.english_name(), lord.level.name()),
                );
            }
        }
        if best.ashtakavarga.value >= 70.0 {
            push_unique(&mut supporting_factors, "High ashtakavarga support".into());
        }
        if best.resonance >= 7.0 {
            push_unique(&mut supporting_factors, "Dasha lord in high-bindu sign".into());
        }
    }
    for h in points.iter().flat_map(|p| &p.highlights) {
        if h.favorable && h.significance == Significance::Major {
            push_unique(
                &mut supporting_factors,
                format!("Favorable {} transit", h.graha.english_name()),
            );
        }
    }
    if supporting_factors.is_empty() {
        supporting_factors.push("Multiple favorable factors aligning".into());
    }

    let suggested_areas: Vec<LifeArea> = ALL_LIFE_AREAS
        .into_iter()
        .filter(|a| a.profile().primary.iter().any(|g| dominant_planets.contains(g)))
        .collect();

    PeakWindow {
        span,
        dominant_planets,
        supporting_factors,
        suggested_areas,
    }
}

/// Areas to hold back on when none of their primary significators rules a
/// period with at least moderate strength.
const GUARDED_AREAS: [LifeArea; 3] = [LifeArea::Career, LifeArea::Wealth, LifeArea::Litigation];

/// Remedies keyed on weak period lords, adverse major transits and the
/// weakest pillar of the lowest point.
fn remedies(low: &SynthesizedPoint) -> Vec<String> {
    let mut out = Vec::new();
    for lord in low.lords.iter().filter(|l| l.strength.is_weak()) {
        push_unique(
            &mut out,
            format!("Strengthen {} through its gemstone or mantra", lord.graha.english_name()),
        );
    }
    for h in &low.highlights {
        if h.favorable || h.significance != Significance::Major {
            continue;
        }
        let remedy = match h.graha {
            Graha::Shani => "Offer sesame oil to Saturn on Saturdays",
            Graha::Rahu => "Recite the Rahu stotra and avoid risky decisions",
            Graha::Mangal => "Fast on Tuesdays and avoid conflicts",
            _ => continue,
        };
        push_unique(&mut out, remedy.to_string());
    }
    let pillars = [&low.dasha, &low.transit, &low.ashtakavarga];
    if let Some(weakest) = pillars
        .into_iter()
        .filter(|p| p.value < CHALLENGE_LEVEL)
        .min_by(|a, b| a.value.total_cmp(&b.value))
    {
        let remedy = match weakest.pillar {
            Pillar::Dasha => "Keep commitments small until the period lords recover",
            Pillar::Transit => "Let the slow transits move on before committing",
            Pillar::Ashtakavarga => "Act where the chart holds more bindus",
        };
        push_unique(&mut out, remedy.to_string());
    }
    out
}

/// Critical period details from its member points.
pub fn critical_period(points: &[SynthesizedPoint], span: WindowSpan) -> CriticalPeriod {
    let challenging_planets =
        most_frequent(points.iter().map(|p| p.challenging_planets.as_slice()));

    let mut challenges = Vec::new();
    let mut mitigations = Vec::new();
    let mut remedial = Vec::new();
    let mut avoid = Vec::new();
    if let Some(low) = extremum_point(points, &span) {
        if low.dasha.value < CHALLENGE_LEVEL {
            challenges.push("Challenging dasha period".to_string());
        }
        if low.transit.value < CHALLENGE_LEVEL {
            challenges.push("Difficult transits".to_string());
        }
        if low.ashtakavarga.value < CHALLENGE_LEVEL {
            challenges.push("Weak ashtakavarga support".to_string());
        }

        for lord in &low.lords {
            let name = lord.graha.english_name();
            if !lord.strength.is_weak() {
                push_unique(&mut mitigations, format!("{name} maintains reasonable strength"));
            }
            if lord.yogakaraka {
                push_unique(
                    &mut mitigations,
                    format!("{name} is yogakaraka and offers protection"),
                );
            }
        }
        for h in &low.highlights {
            if h.favorable {
                push_unique(
                    &mut mitigations,
                    format!("{} transit is supportive", h.graha.english_name()),
                );
            }
        }
        if low.ashtakavarga.value >= 45.0 {
            mitigations.push("Ashtakavarga support provides baseline stability".into());
        }

        remedial = remedies(low);
        avoid = GUARDED_AREAS
            .into_iter()
            .filter(|area| {
                let key = area.profile().primary;
                !low.lords
                    .iter()
                    .any(|l| key.contains(&l.graha) && !l.strength.is_weak())
            })
            .collect();
    }
    if challenges.is_empty() {
        challenges.push("Multiple challenging factors".into());
    }
    push_unique(&mut remedial, "Practice patience and mindfulness".into());
    push_unique(&mut remedial, "Avoid major new initiatives; keep to routine matters".into());
    remedial.truncate(MAX_RECOMMENDATIONS);

    CriticalPeriod {
        span,
        challenging_planets,
        challenges,
        mitigations,
        remedies: remedial,
        avoid,
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn recommendations(quality: TimelineQuality, trend: Trend, peaks: &[PeakWindow]) -> Vec<String> {
    let mut out = Vec::new();
    let best = peaks
        .iter()
        .max_by(|a, b| a.span.average.total_cmp(&b.span.average));
    match quality {
        TimelineQuality::VeryFavorable | TimelineQuality::Favorable => {
            out.push("Good time for new initiatives and important decisions".to_string());
            if let Some(best) = best {
                out.push(format!(
                    "Best window around {}",
                    best.span.extremum_at.format("%Y-%m-%d")
                ));
            }
        }
        TimelineQuality::Mixed => {
            out.push("Timing matters; plan around the favorable windows".to_string());
            if best.is_some() {
                out.push("Schedule key activities inside peak windows".to_string());
            }
        }
        TimelineQuality::Challenging | TimelineQuality::VeryChallenging => {
            out.push("Focus on consolidation rather than expansion".to_string());
            out.push("Use this period for planning and preparation".to_string());
        }
    }
    match trend {
        Trend::StronglyImproving | Trend::Improving => {
            out.push("Conditions are improving; patience will be rewarded".to_string());
        }
        Trend::StronglyDeclining | Trend::Declining => {
            out.push("Complete important matters sooner rather than later".to_string());
        }
        Trend::Volatile => out.push("Scores fluctuate; remain adaptable".to_string()),
        Trend::StablePositive | Trend::StableNeutral | Trend::StableNegative => {}
    }
    out.truncate(MAX_RECOMMENDATIONS);
    out
}

fn summary(stats: &TimelineStatistics, trend: Trend, peaks: usize, criticals: usize) -> String {
    let mut out = format!(
        "{} outlook, trend {}. Average score {:.0}. Found {peaks} favorable window{}",
        stats.quality.name(),
        trend.name().to_lowercase(),
        stats.average,
        if peaks == 1 { "" } else { "s" },
    );
    if criticals > 0 {
        out.push_str(&format!(
            " and {criticals} challenging period{}",
            if criticals == 1 { "" } else { "s" }
        ));
    }
    out.push('.');
    out
}

/// Analyze a time-ordered sequence of synthesized points.
pub fn build_timeline(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: TimeDelta,
    points: Vec<SynthesizedPoint>,
    config: &SynthesisConfig,
) -> Timeline {
    let samples: Vec<Sample> = points
        .iter()
        .map(|p| Sample {
            instant: p.instant,
            score: p.score,
        })
        .collect();
    let members = |span: &WindowSpan| points.get(span.first..=span.last).unwrap_or(&[]);

    let peak_windows: Vec<PeakWindow> = detect_runs(
        &samples,
        RunKind::Peak,
        config.peak_threshold(),
        config.min_window_duration(),
    )
    .into_iter()
    .map(|span| peak_window(members(&span), span))
    .collect();
    let critical_periods: Vec<CriticalPeriod> = detect_runs(
        &samples,
        RunKind::Critical,
        config.critical_threshold(),
        config.min_window_duration(),
    )
    .into_iter()
    .map(|span| critical_period(members(&span), span))
    .collect();

    let scores: Vec<f64> = samples.iter().map(|s| s.score).collect();
    let trend = classify_trend(&scores);
    let neutral = Sample {
        instant: start,
        score: NEUTRAL_SCORE,
    };
    let fallback = TimelineStatistics {
        average: neutral.score,
        volatility: 0.0,
        best: neutral,
        worst: neutral,
        best_weekday: start.weekday(),
        quality: timeline_quality(neutral.score, 0),
    };
    let statistics = timeline_statistics(&samples, peak_windows.len()).unwrap_or(fallback);

    info!(
        points = points.len(),
        peaks = peak_windows.len(),
        criticals = critical_periods.len(),
        trend = trend.name(),
        "timeline analyzed"
    );
    debug!(
        average = statistics.average,
        volatility = statistics.volatility,
        "timeline statistics"
    );

    Timeline {
        start,
        end,
        interval_secs: interval.num_seconds(),
        monthly_averages: monthly_averages(&samples),
        recommendations: recommendations(statistics.quality, trend, &peak_windows),
        summary: summary(&statistics, trend, peak_windows.len(), critical_periods.len()),
        points,
        peak_windows,
        critical_periods,
        trend,
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::PillarScore;
    use crate::synthesis_types::{ActiveLord, AlignmentState, ProbabilityRating};
    use crate::transit_types::TransitHighlight;
    use chrono::TimeZone;
    use dhruv_vedic_base::DashaLevel;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("valid date"))
    }

    fn samples(scores: &[f64]) -> Vec<Sample> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| Sample {
                instant: t0() + TimeDelta::days(i as i64),
                score,
            })
            .collect()
    }

    #[test]
    fn adaptive_table() {
        assert_eq!(adaptive_interval(TimeDelta::days(7)), TimeDelta::hours(6));
        assert_eq!(adaptive_interval(TimeDelta::days(8)), TimeDelta::hours(12));
        assert_eq!(adaptive_interval(TimeDelta::days(31)), TimeDelta::hours(12));
        assert_eq!(adaptive_interval(TimeDelta::days(180)), TimeDelta::days(1));
        assert_eq!(adaptive_interval(TimeDelta::days(730)), TimeDelta::days(3));
        assert_eq!(adaptive_interval(TimeDelta::days(731)), TimeDelta::days(7));
    }

    #[test]
    fn instants_include_both_ends() {
        let end = t0() + TimeDelta::days(2);
        let got =
            sample_instants(t0(), end, TimeDelta::hours(12)).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(got.len(), 5);
        assert_eq!(got.first(), Some(&t0()));
        assert_eq!(got.last(), Some(&end));
    }

    #[test]
    fn instants_reject_bad_ranges() {
        assert!(matches!(
            sample_instants(t0(), t0(), TimeDelta::hours(1)),
            Err(TrayiError::InvalidRange { .. })
        ));
        let far = t0() + TimeDelta::days(365 * 20);
        assert!(matches!(
            sample_instants(t0(), far, TimeDelta::hours(1)),
            Err(TrayiError::TooManySamples { .. })
        ));
    }

    #[test]
    fn runs_close_on_cross_and_at_end() {
        let s = samples(&[50.0, 70.0, 80.0, 60.0, 66.0, 65.0]);
        let runs = detect_runs(&s, RunKind::Peak, 65.0, TimeDelta::zero());
        assert_eq!(runs.len(), 2);
        assert_eq!((runs[0].first, runs[0].last), (1, 2));
        assert_eq!(runs[0].extremum, 80.0);
        assert_eq!(runs[0].extremum_at, s[2].instant);
        assert!((runs[0].average - 75.0).abs() < 1e-12);
        assert_eq!((runs[1].first, runs[1].last), (4, 5));
    }

    #[test]
    fn critical_tracks_minimum() {
        let s = samples(&[30.0, 20.0, 20.0, 36.0]);
        let runs = detect_runs(&s, RunKind::Critical, 35.0, TimeDelta::zero());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].extremum, 20.0);
        // first occurrence
        assert_eq!(runs[0].extremum_at, s[1].instant);
    }

    #[test]
    fn short_runs_dropped() {
        let s = samples(&[70.0, 40.0, 70.0, 70.0, 70.0]);
        let runs = detect_runs(&s, RunKind::Peak, 65.0, TimeDelta::days(1));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].first, 2);
    }

    #[test]
    fn trend_classes() {
        let rising: Vec<f64> = (0..20).map(|i| 30.0 + f64::from(i) * 2.0).collect();
        assert_eq!(classify_trend(&rising), Trend::StronglyImproving);
        let falling: Vec<f64> = (0..20).map(|i| 60.0 - f64::from(i)).collect();
        assert_eq!(classify_trend(&falling), Trend::StronglyDeclining);
        assert_eq!(classify_trend(&[70.0; 10]), Trend::StablePositive);
        assert_eq!(classify_trend(&[30.0; 10]), Trend::StableNegative);
        assert_eq!(classify_trend(&[50.0; 10]), Trend::StableNeutral);
        let zigzag: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 20.0 } else { 80.0 }).collect();
        assert_eq!(classify_trend(&zigzag), Trend::Volatile);
        assert_eq!(classify_trend(&[]), Trend::StableNeutral);
    }

    #[test]
    fn slow_wide_swing_is_volatile() {
        // 20 -> 80 -> 20, twice, over 100 points
        let wave: Vec<f64> = (0..100)
            .map(|i| {
                let phase = f64::from(i % 50);
                if phase < 25.0 {
                    20.0 + phase * 2.4
                } else {
                    80.0 - (phase - 25.0) * 2.4
                }
            })
            .collect();
        assert!(volatility(&wave) > 15.0);
        assert_eq!(classify_trend(&wave), Trend::Volatile);
    }

    #[test]
    fn wide_climb_is_volatile_not_improving() {
        let climb: Vec<f64> = (0..40).map(|i| 10.0 + f64::from(i) * 2.0).collect();
        assert!(volatility(&climb) > 15.0);
        assert_eq!(classify_trend(&climb), Trend::Volatile);
    }

    #[test]
    fn mild_rise_is_improving() {
        let s: Vec<f64> = (0..8).map(|i| 50.0 + f64::from(i)).collect();
        // quarters: 50.5 vs 56.5
        assert_eq!(classify_trend(&s), Trend::Improving);
    }

    #[test]
    fn statistics_and_months() {
        let mut s = samples(&[40.0, 60.0, 80.0]);
        s.push(Sample {
            instant: t0() + TimeDelta::days(40),
            score: 20.0,
        });
        let stats = timeline_statistics(&s, 0).unwrap_or_else(|| panic!("stats"));
        assert!((stats.average - 50.0).abs() < 1e-12);
        assert_eq!(stats.best.score, 80.0);
        assert_eq!(stats.worst.score, 20.0);
        // 2025-01-03 is a Friday
        assert_eq!(stats.best_weekday, Weekday::Fri);
        assert_eq!(stats.quality, TimelineQuality::Mixed);

        let months = monthly_averages(&s);
        let keys: Vec<&str> = months.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2025-01", "2025-02"]);
        assert!((months["2025-01"] - 60.0).abs() < 1e-12);
        assert!(timeline_statistics(&[], 0).is_none());
    }

    #[test]
    fn quality_needs_two_peaks_for_very_favorable() {
        assert_eq!(timeline_quality(75.0, 1), TimelineQuality::Favorable);
        assert_eq!(timeline_quality(75.0, 2), TimelineQuality::VeryFavorable);
        assert_eq!(timeline_quality(34.0, 0), TimelineQuality::VeryChallenging);
    }

    fn low_point(lords: Vec<ActiveLord>, highlights: Vec<TransitHighlight>) -> SynthesizedPoint {
        SynthesizedPoint {
            instant: t0(),
            bodies: Vec::new(),
            score: 25.0,
            rating: ProbabilityRating::Challenging,
            alignment: AlignmentState::AllUnfavorable,
            resonance: 0.0,
            peak_planets: Vec::new(),
            challenging_planets: vec![Graha::Shani],
            dasha: PillarScore::new(Pillar::Dasha, 45.0, Vec::new(), ""),
            transit: PillarScore::new(Pillar::Transit, 20.0, Vec::new(), ""),
            ashtakavarga: PillarScore::new(Pillar::Ashtakavarga, 30.0, Vec::new(), ""),
            lords,
            highlights,
        }
    }

    fn lord(graha: Graha, level: DashaLevel, strength: LordStrength) -> ActiveLord {
        ActiveLord {
            graha,
            level,
            score: 30.0,
            strength,
            yogakaraka: false,
        }
    }

    fn span_of(point: &SynthesizedPoint) -> WindowSpan {
        WindowSpan {
            start: point.instant,
            end: point.instant,
            first: 0,
            last: 0,
            extremum_at: point.instant,
            extremum: point.score,
            average: point.score,
        }
    }

    #[test]
    fn critical_period_remedies_follow_weak_lords_and_transits() {
        let saturn_transit = TransitHighlight {
            graha: Graha::Shani,
            rashi: dhruv_vedic_base::Rashi::Vrishabha,
            house_from_moon: 12,
            retrograde: false,
            favorable: false,
            obstructed: false,
            significance: Significance::Major,
        };
        let point = low_point(
            vec![
                lord(Graha::Chandra, DashaLevel::Mahadasha, LordStrength::Weak),
                lord(Graha::Guru, DashaLevel::Antardasha, LordStrength::Moderate),
            ],
            vec![saturn_transit],
        );
        let span = span_of(&point);
        let period = critical_period(std::slice::from_ref(&point), span);

        assert_eq!(
            period.remedies,
            vec![
                "Strengthen Moon through its gemstone or mantra".to_string(),
                "Offer sesame oil to Saturn on Saturdays".to_string(),
                // transit is the weakest pillar
                "Let the slow transits move on before committing".to_string(),
                "Practice patience and mindfulness".to_string(),
                "Avoid major new initiatives; keep to routine matters".to_string(),
            ]
        );
        // Jupiter is a primary wealth significator of moderate strength
        assert_eq!(period.avoid, vec![LifeArea::Career, LifeArea::Litigation]);
        assert!(period.challenges.contains(&"Difficult transits".to_string()));
    }

    #[test]
    fn remedies_are_capped_and_general_without_points() {
        let lords = [Graha::Surya, Graha::Chandra, Graha::Mangal]
            .into_iter()
            .zip([DashaLevel::Mahadasha, DashaLevel::Antardasha, DashaLevel::Pratyantardasha])
            .map(|(g, level)| lord(g, level, LordStrength::VeryWeak))
            .collect();
        let point = low_point(lords, Vec::new());
        let period = critical_period(std::slice::from_ref(&point), span_of(&point));
        assert_eq!(period.remedies.len(), 5);
        assert!(period.remedies[0].contains("Sun"));
        assert_eq!(period.avoid.len(), 3);

        let empty = critical_period(&[], span_of(&point));
        assert_eq!(empty.remedies.len(), 2);
        assert!(empty.avoid.is_empty());
    }

    #[test]
    fn frequency_ranking() {
        let lists: [&[Graha]; 3] = [
            &[Graha::Guru, Graha::Shukra],
            &[Graha::Shukra],
            &[Graha::Surya, Graha::Shukra, Graha::Guru, Graha::Shani],
        ];
        assert_eq!(
            most_frequent(lists.into_iter()),
            vec![Graha::Shukra, Graha::Guru, Graha::Surya]
        );
    }
}
