//! Triple-pillar timing synthesis.
//!
//! Three independent predictive pillars are scored for a natal chart at an
//! instant and combined into one success score:
//! - Dasha: strength of the active period lords in the natal chart
//! - Transit (gochara): positions from the natal Moon, with vedha
//! - Ashtakavarga: bindu support for each body in its transit sign
//!
//! The synthesizer weights the pillars per body and per instant with an
//! alignment bonus; the timeline samples a date range and finds peak windows,
//! critical periods and the trend; the life-area projector re-weights the
//! result for one topic.
//!
//! Positions, dasha periods and bindu tables come from the collaborator
//! traits in [`providers`]. Reference implementations over precomputed data
//! are included.

pub mod ashtakavarga_pillar;
pub mod ashtakavarga_types;
pub mod chart;
pub mod config;
pub mod dasha_pillar;
pub mod dasha_types;
pub mod engine;
pub mod error;
pub mod gochara;
pub mod life_area;
pub mod providers;
pub mod score;
pub mod synthesis;
pub mod synthesis_types;
pub mod telemetry;
pub mod timeline;
pub mod timeline_types;
pub mod transit_pillar;
pub mod transit_types;

pub use ashtakavarga_pillar::{sav_distribution, score_ashtakavarga};
pub use ashtakavarga_types::{
    AshtakavargaAnalysis, BinduBodyScore, BinduQuality, KakshaSource, PurusharthaTotals,
    SavDistribution,
};
pub use chart::{ChartInput, GrahaPosition, NatalChart, NatalPlacement, PositionSnapshot};
pub use config::{
    ALIGNMENT_THRESHOLD, FeatureToggles, PillarWeights, RawConfig, Sampling, SynthesisConfig,
    SynthesisConfigBuilder,
};
pub use dasha_pillar::{analyze_lord, combination_modifier, score_dasha};
pub use dasha_types::{
    CombinationSummary, DashaAnalysis, DashaCombination, LordAnalysis, LordStrength,
};
pub use engine::TrayiEngine;
pub use error::{ConfigError, ProviderError, TrayiError};
pub use gochara::GocharaClass;
pub use life_area::{
    ALL_LIFE_AREAS, AreaWindow, LifeArea, LifeAreaProbability, LifeAreaProfile,
    PlanetContribution, SignificatorRole, best_window_for_area, project_life_area,
};
pub use providers::{
    BinduTable, DashaPeriod, DashaPeriodTable, DashaProvider, EphemerisProvider, NatalBindus,
    RulingLord, RulingLords, SnapshotEphemeris,
};
pub use score::{ALL_PILLARS, Factor, NEUTRAL_SCORE, Pillar, PillarScore, ScoreBucket};
pub use synthesis::{score_pillar, synthesize_point};
pub use synthesis_types::{
    ActiveLord, AlignmentState, InstantInputs, PlanetSynthesis, ProbabilityRating,
    SynthesizedPoint,
};
pub use telemetry::init_default_tracing;
pub use timeline::{MAX_TIMELINE_POINTS, build_timeline, classify_trend, detect_runs};
pub use timeline_types::{
    CriticalPeriod, PeakWindow, RunKind, Sample, Timeline, TimelineQuality, TimelineStatistics,
    Trend, WindowSpan,
};
pub use transit_pillar::score_transit;
pub use transit_types::{
    BodyTransit, Severity, Significance, TransitAnalysis, TransitConfiguration,
};
