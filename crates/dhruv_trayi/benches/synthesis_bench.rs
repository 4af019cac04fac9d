use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dhruv_trayi::{
    GrahaPosition, InstantInputs, NatalBindus, NatalChart, Pillar, PositionSnapshot, RulingLords,
    RunKind, Sample, SynthesisConfig, classify_trend, detect_runs, score_pillar, synthesize_point,
};
use dhruv_vedic_base::{ALL_GRAHAS, Graha};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("valid epoch"))
}

fn chart() -> NatalChart {
    NatalChart::whole_sign(
        215.0,
        ALL_GRAHAS
            .into_iter()
            .zip([300.0, 40.0, 200.0, 280.0, 95.0, 330.0, 10.0, 130.0, 310.0])
            .map(|(g, lon)| (g, GrahaPosition::new(lon))),
    )
    .unwrap_or_else(|e| panic!("{e}"))
}

fn snapshot() -> PositionSnapshot {
    ALL_GRAHAS
        .into_iter()
        .zip([260.0, 75.0, 100.0, 250.0, 65.0, 300.0, 335.0, 355.0, 175.0])
        .fold(PositionSnapshot::new(epoch()), |s, (g, lon)| {
            s.with(g, GrahaPosition::new(lon))
        })
}

fn synthesis_bench(c: &mut Criterion) {
    let chart = chart();
    let bindus = NatalBindus::from_chart(&chart).unwrap_or_else(|e| panic!("{e}"));
    let snapshot = snapshot();
    let lords = RulingLords::from_grahas(&[Graha::Guru, Graha::Shani, Graha::Buddh]);
    let inputs = InstantInputs::new(&snapshot, &lords, &bindus);
    let config = SynthesisConfig::default();

    let mut group = c.benchmark_group("synthesis");
    for pillar in [Pillar::Dasha, Pillar::Transit, Pillar::Ashtakavarga] {
        group.bench_function(pillar.name(), |b| {
            b.iter(|| score_pillar(black_box(pillar), &chart, &inputs, &config))
        });
    }
    group.bench_function("synthesize_point", |b| {
        b.iter(|| synthesize_point(black_box(&chart), &inputs, &config))
    });
    group.finish();
}

fn timeline_bench(c: &mut Criterion) {
    // one year at daily sampling
    let samples: Vec<Sample> = (0..365)
        .map(|i| Sample {
            instant: epoch() + TimeDelta::days(i),
            score: 50.0 + 25.0 * (i as f64 / 20.0).sin(),
        })
        .collect();
    let scores: Vec<f64> = samples.iter().map(|s| s.score).collect();

    let mut group = c.benchmark_group("timeline");
    group.bench_function("detect_runs", |b| {
        b.iter(|| detect_runs(black_box(&samples), RunKind::Peak, 65.0, TimeDelta::zero()))
    });
    group.bench_function("classify_trend", |b| {
        b.iter(|| classify_trend(black_box(&scores)))
    });
    group.finish();
}

criterion_group!(benches, synthesis_bench, timeline_bench);
criterion_main!(benches);
