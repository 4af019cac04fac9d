mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dhruv_trayi::{
    LifeArea, LifeAreaProbability, Pillar, PillarScore, SignificatorRole, SynthesizedPoint,
    Timeline,
};
use dhruv_vedic_base::{
    ALL_RASHIS, AshtakavargaInput, Rashi, calculate_ashtakavarga, rashi_from_longitude,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::scenario::{Scenario, ScenarioError};

#[derive(Parser)]
#[command(name = "dhruv-trayi", about = "Triple-pillar timing synthesis CLI")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rashi from sidereal longitude
    Rashi {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Bhinna and Sarva Ashtakavarga from rashi positions
    Bindus {
        /// Comma-separated rashi indices for Sun,Moon,Mars,Mercury,Jupiter,Venus,Saturn (0-11)
        #[arg(long)]
        graha_rashis: String,
        /// Lagna rashi index (0-11)
        #[arg(long)]
        lagna_rashi: u8,
    },
    /// Score one pillar at an instant
    Score {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,
        /// dasha, transit (gochara) or ashtakavarga (bindu)
        #[arg(long, value_parser = parse_pillar)]
        pillar: Pillar,
        /// UTC instant (RFC 3339)
        #[arg(long)]
        at: DateTime<Utc>,
    },
    /// Synthesize all three pillars at an instant
    Synthesize {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,
        /// UTC instant (RFC 3339)
        #[arg(long)]
        at: DateTime<Utc>,
    },
    /// Sample a date range and report windows and trend
    Timeline {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,
        /// Range start, UTC (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Range end, UTC (RFC 3339), inclusive
        #[arg(long)]
        end: DateTime<Utc>,
    },
    /// Project the synthesis onto a life area
    LifeArea {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,
        /// Career, Wealth, Relationship, Health, Education, Spirituality,
        /// Property, Travel, Children or Litigation
        #[arg(long, value_parser = parse_life_area)]
        area: LifeArea,
        /// UTC instant (RFC 3339)
        #[arg(long)]
        at: DateTime<Utc>,
        /// Also rank the peak windows from here to `--until`
        #[arg(long, requires = "until")]
        from: Option<DateTime<Utc>>,
        #[arg(long, requires = "from")]
        until: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Trayi(#[from] dhruv_trayi::TrayiError),
    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Input(String),
}

fn parse_pillar(s: &str) -> Result<Pillar, String> {
    Pillar::from_name(s)
        .ok_or_else(|| format!("unknown pillar {s:?}; use dasha, transit or ashtakavarga"))
}

fn parse_life_area(s: &str) -> Result<LifeArea, String> {
    LifeArea::from_name(s).ok_or_else(|| format!("unknown life area {s:?}"))
}

fn rashi_at(idx: usize) -> Result<Rashi, CliError> {
    ALL_RASHIS
        .get(idx)
        .copied()
        .ok_or_else(|| CliError::Input(format!("rashi index {idx} outside 0-11")))
}

fn parse_rashi_index(s: &str) -> Result<Rashi, CliError> {
    let idx: usize = s
        .trim()
        .parse()
        .map_err(|e| CliError::Input(format!("invalid rashi index {s:?}: {e}")))?;
    rashi_at(idx)
}

fn parse_graha_rashis(s: &str) -> Result<[Rashi; 7], CliError> {
    let rashis = s
        .split(',')
        .map(parse_rashi_index)
        .collect::<Result<Vec<_>, _>>()?;
    <[Rashi; 7]>::try_from(rashis)
        .map_err(|v| CliError::Input(format!("expected 7 rashi indices, got {}", v.len())))
}

fn emit_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

fn print_pillar(score: &PillarScore) {
    println!(
        "{:<13} {:>6.1}  {}",
        score.pillar.name(),
        score.value,
        score.bucket.name()
    );
    for f in &score.factors {
        println!("    {:+7.1}  {}", f.delta, f.label);
    }
    println!("    {}", score.narrative);
}

fn print_point(point: &SynthesizedPoint) {
    println!("Synthesis at {}", point.instant.to_rfc3339());
    println!(
        "Score: {:.1} ({})  Alignment: {}  Resonance: {:+.1}\n",
        point.score,
        point.rating.name(),
        point.alignment.name(),
        point.resonance
    );
    for pillar in [&point.dasha, &point.transit, &point.ashtakavarga] {
        print_pillar(pillar);
    }

    println!(
        "\n{:>10} {:>7} {:>7} {:>7} {:>7}  Alignment",
        "", "Dasha", "Transit", "Bindu", "Score"
    );
    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
    for b in &point.bodies {
        println!(
            "{:>10} {:>7} {:>7.1} {:>7} {:>7.1}  {}",
            b.graha.english_name(),
            fmt(b.dasha),
            b.transit,
            fmt(b.ashtakavarga),
            b.score,
            b.alignment.name()
        );
    }
}

fn print_timeline(timeline: &Timeline) {
    println!(
        "Timeline {} to {} ({} points, every {} h)",
        timeline.start.to_rfc3339(),
        timeline.end.to_rfc3339(),
        timeline.points.len(),
        timeline.interval_secs / 3600
    );
    println!("{}\n", timeline.summary);

    let stats = &timeline.statistics;
    println!(
        "Average {:.1}  Volatility {:.1}  Trend {}  Quality {}",
        stats.average,
        stats.volatility,
        timeline.trend.name(),
        stats.quality.name()
    );
    println!(
        "Best {:.1} at {}  Worst {:.1} at {}  Best weekday {}",
        stats.best.score,
        stats.best.instant.to_rfc3339(),
        stats.worst.score,
        stats.worst.instant.to_rfc3339(),
        stats.best_weekday
    );

    println!("\nPeak windows:");
    for w in &timeline.peak_windows {
        println!(
            "  {} .. {}  peak {:.1}  avg {:.1}",
            w.span.start.format("%Y-%m-%d %H:%M"),
            w.span.end.format("%Y-%m-%d %H:%M"),
            w.span.extremum,
            w.span.average
        );
        for f in &w.supporting_factors {
            println!("      + {f}");
        }
    }
    println!("\nCritical periods:");
    for c in &timeline.critical_periods {
        println!(
            "  {} .. {}  low {:.1}  avg {:.1}",
            c.span.start.format("%Y-%m-%d %H:%M"),
            c.span.end.format("%Y-%m-%d %H:%M"),
            c.span.extremum,
            c.span.average
        );
        for ch in &c.challenges {
            println!("      - {ch}");
        }
        for r in &c.remedies {
            println!("      ~ {r}");
        }
        if !c.avoid.is_empty() {
            let areas: Vec<&str> = c.avoid.iter().map(|a| a.name()).collect();
            println!("      avoid: {}", areas.join(", "));
        }
    }

    println!("\nMonthly averages:");
    for (month, avg) in &timeline.monthly_averages {
        println!("  {month}  {avg:.1}");
    }
    println!("\nRecommendations:");
    for r in &timeline.recommendations {
        println!("  * {r}");
    }
}

fn print_life_area(out: &LifeAreaProbability) {
    println!(
        "{} at {}: {:.1} ({})",
        out.area.name(),
        out.instant.to_rfc3339(),
        out.score,
        out.rating.name()
    );
    println!(
        "  Houses {:.1}  Primary {:.1}  Secondary {:.1}",
        out.house_strength, out.primary, out.secondary
    );
    for h in &out.houses {
        println!(
            "  House {:>2} {:<10} SAV {:>2}  lord {:<8} {:>5.1}  strength {:.1}",
            h.house.number(),
            h.rashi.western_name(),
            h.sav,
            h.lord.english_name(),
            h.lord_score,
            h.strength
        );
    }
    for c in &out.contributions {
        println!(
            "  {:<8} {:<9} {:>5.1}  adds {:.1}",
            c.graha.english_name(),
            match c.role {
                SignificatorRole::Primary => "primary",
                SignificatorRole::Secondary => "secondary",
            },
            c.score,
            c.contribution
        );
    }
    for l in &out.dasha_lords {
        println!("  {} {} ({})", l.graha.english_name(), l.level.name(), l.strength.name());
    }
    for h in &out.key_transits {
        println!(
            "  {} transit, house {} from the Moon{}",
            h.graha.english_name(),
            h.house_from_moon,
            if h.favorable { ", favorable" } else { "" }
        );
    }
    for r in &out.recommendations {
        println!("  + {r}");
    }
    for c in &out.challenges {
        println!("  - {c}");
    }
    println!("  {}", out.narrative);
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn run(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    match cli.command {
        Commands::Rashi { lon } => {
            let info = rashi_from_longitude(lon);
            let dms = info.dms;
            println!(
                "{} ({}) - {} deg {} min {:.1} sec ({:.4} deg in rashi)",
                info.rashi.name(),
                info.rashi.western_name(),
                dms.degrees,
                dms.minutes,
                dms.seconds,
                info.degrees_in_rashi
            );
        }

        Commands::Bindus {
            graha_rashis,
            lagna_rashi,
        } => {
            let input = AshtakavargaInput {
                graha_rashis: parse_graha_rashis(&graha_rashis)?,
                lagna: rashi_at(usize::from(lagna_rashi))?,
            };
            let result = calculate_ashtakavarga(&input);
            if json {
                return emit_json(&serde_json::json!({
                    "bavs": result.bavs,
                    "sav": result.sav,
                }));
            }
            let graha_names = [
                "Sun", "Moon", "Mars", "Mercury", "Jupiter", "Venus", "Saturn",
            ];
            println!("BAV (Bhinna Ashtakavarga):");
            for (name, bav) in graha_names.iter().zip(&result.bavs) {
                println!("  {:8} {:?} (total: {})", name, bav.points, bav.total());
            }
            println!("\nSAV (Sarva Ashtakavarga):");
            println!("  Total:       {:?}", result.sav.total_points);
            println!("  Trikona:     {:?}", result.sav.after_trikona);
            println!("  Ekadhipatya: {:?}", result.sav.after_ekadhipatya);
        }

        Commands::Score {
            scenario,
            pillar,
            at,
        } => {
            let (chart, engine) = Scenario::load(&scenario)?.into_engine()?;
            let score = engine.score_pillar(pillar, &chart, at)?;
            if json {
                return emit_json(&score);
            }
            print_pillar(&score);
        }

        Commands::Synthesize { scenario, at } => {
            let (chart, engine) = Scenario::load(&scenario)?.into_engine()?;
            let point = engine.synthesize(&chart, at)?;
            if json {
                return emit_json(&point);
            }
            print_point(&point);
        }

        Commands::Timeline {
            scenario,
            start,
            end,
        } => {
            let (chart, engine) = Scenario::load(&scenario)?.into_engine()?;
            let timeline = engine.generate_timeline(&chart, start, end)?;
            info!(
                peaks = timeline.peak_windows.len(),
                critical = timeline.critical_periods.len(),
                "timeline ready"
            );
            if json {
                return emit_json(&timeline);
            }
            print_timeline(&timeline);
        }

        Commands::LifeArea {
            scenario,
            area,
            at,
            from,
            until,
        } => {
            let (chart, engine) = Scenario::load(&scenario)?.into_engine()?;
            let projection = engine.project_life_area(&chart, at, area)?;
            let best = match (from, until) {
                (Some(start), Some(end)) => {
                    let timeline = engine.generate_timeline(&chart, start, end)?;
                    engine.best_window_for_area(&chart, &timeline, area)?
                }
                _ => None,
            };
            if json {
                return emit_json(&serde_json::json!({
                    "projection": projection,
                    "best_window": best,
                }));
            }
            print_life_area(&projection);
            if from.is_some() {
                match best {
                    Some(w) => println!(
                        "\nBest window: {} .. {}  area avg {:.1}",
                        w.window.span.start.format("%Y-%m-%d %H:%M"),
                        w.window.span.end.format("%Y-%m-%d %H:%M"),
                        w.average
                    ),
                    None => println!("\nNo peak window in range."),
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = dhruv_trayi::init_default_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
