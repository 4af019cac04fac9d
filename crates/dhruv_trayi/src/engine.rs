//! Engine facade over a validated config and the three collaborators.

use std::fmt::Formatter;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::chart::{NatalChart, PositionSnapshot};
use crate::config::SynthesisConfig;
use crate::error::TrayiError;
use crate::life_area::{self, AreaWindow, LifeArea, LifeAreaProbability};
use crate::providers::{BinduTable, DashaProvider, EphemerisProvider, RulingLords};
use crate::score::{Pillar, PillarScore};
use crate::synthesis::{score_pillar, synthesize_point};
use crate::synthesis_types::{InstantInputs, SynthesizedPoint};
use crate::timeline::{build_timeline, sample_instants, sampling_interval};
use crate::timeline_types::Timeline;

/// Triple-pillar synthesis engine.
///
/// `TrayiEngine` is [`Send`] + [`Sync`] whenever its providers are, which
/// the provider traits require. Every call is independent; nothing is cached
/// between calls.
pub struct TrayiEngine<E, D, B> {
    config: SynthesisConfig,
    ephemeris: E,
    dasha: D,
    bindus: B,
}

impl<E, D, B> std::fmt::Debug for TrayiEngine<E, D, B>
where
    E: EphemerisProvider,
    D: DashaProvider,
    B: BinduTable,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayiEngine")
            .field("config", &self.config)
            .field("ephemeris", &self.ephemeris.name())
            .field("dasha", &self.dasha.name())
            .field("bindus", &self.bindus.name())
            .finish()
    }
}

impl<E, D, B> TrayiEngine<E, D, B>
where
    E: EphemerisProvider,
    D: DashaProvider,
    B: BinduTable,
{
    pub fn new(config: SynthesisConfig, ephemeris: E, dasha: D, bindus: B) -> Self {
        Self {
            config,
            ephemeris,
            dasha,
            bindus,
        }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    fn snapshot_at(&self, instant: DateTime<Utc>) -> Result<PositionSnapshot, TrayiError> {
        self.ephemeris
            .positions_at(instant)
            .map(|s| s.at(instant))
            .map_err(|e| TrayiError::provider(self.ephemeris.name(), e))
    }

    fn lords_at(&self, instant: DateTime<Utc>) -> Result<RulingLords, TrayiError> {
        self.dasha
            .ruling_lords_at(instant)
            .map_err(|e| TrayiError::provider(self.dasha.name(), e))
    }

    /// Score one pillar at an instant.
    pub fn score_pillar(
        &self,
        pillar: Pillar,
        chart: &NatalChart,
        instant: DateTime<Utc>,
    ) -> Result<PillarScore, TrayiError> {
        let snapshot = self.snapshot_at(instant)?;
        let lords = self.lords_at(instant)?;
        let inputs = InstantInputs::new(&snapshot, &lords, &self.bindus);
        score_pillar(pillar, chart, &inputs, &self.config)
    }

    /// Synthesize all three pillars at an instant.
    pub fn synthesize(
        &self,
        chart: &NatalChart,
        instant: DateTime<Utc>,
    ) -> Result<SynthesizedPoint, TrayiError> {
        let snapshot = self.snapshot_at(instant)?;
        let lords = self.lords_at(instant)?;
        let inputs = InstantInputs::new(&snapshot, &lords, &self.bindus);
        synthesize_point(chart, &inputs, &self.config)
    }

    /// Sample the synthesizer from `start` to `end` inclusive and analyze
    /// the resulting sequence.
    pub fn generate_timeline(
        &self,
        chart: &NatalChart,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Timeline, TrayiError> {
        let interval = sampling_interval(start, end, self.config.sampling());
        let instants = sample_instants(start, end, interval)?;
        info!(
            %start,
            %end,
            interval_secs = interval.num_seconds(),
            samples = instants.len(),
            "generating timeline"
        );

        #[cfg(feature = "parallel")]
        let points: Vec<SynthesizedPoint> = instants
            .par_iter()
            .map(|&t| self.synthesize(chart, t))
            .collect::<Result<_, _>>()?;

        #[cfg(not(feature = "parallel"))]
        let points: Vec<SynthesizedPoint> = instants
            .iter()
            .map(|&t| self.synthesize(chart, t))
            .collect::<Result<_, _>>()?;

        Ok(build_timeline(start, end, interval, points, &self.config))
    }

    /// Project the synthesis at an instant onto a life area.
    pub fn project_life_area(
        &self,
        chart: &NatalChart,
        instant: DateTime<Utc>,
        area: LifeArea,
    ) -> Result<LifeAreaProbability, TrayiError> {
        let point = self.synthesize(chart, instant)?;
        let out = life_area::project_life_area(chart, &point, &self.bindus, area)?;
        debug!(area = area.name(), score = out.score, "life area projected");
        Ok(out)
    }

    /// Peak window of `timeline` best suited to a life area.
    pub fn best_window_for_area(
        &self,
        chart: &NatalChart,
        timeline: &Timeline,
        area: LifeArea,
    ) -> Result<Option<AreaWindow>, TrayiError> {
        life_area::best_window_for_area(chart, timeline, &self.bindus, area)
    }
}
