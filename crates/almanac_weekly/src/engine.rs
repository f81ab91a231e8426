//! The `generate` entry point.

use std::collections::BTreeMap;

use almanac_core::{Body, CoreError, Ephemeris, Observer, PositionCache, PositionOracle};
use almanac_search::{
    AspectEvent, Diagnostics, Event, MoonPhaseEvent, SearchWindow, SeasonalEvent,
    SignIngressEvent, StationEvent, rank_events, search_aspects, search_moon_phases,
    search_sign_ingresses, search_stations, seasonal_markers,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::EngineConfig;
use crate::error::{ConfigurationError, EngineError};
use crate::forecast::{DailyForecast, synthesize_forecasts};
use crate::scoring::score_categories;
use crate::scoring_types::{CategoryRanking, ScoringCategory};
use crate::timing::{TimingGuide, timing_guide};

/// Everything computed for one window. Plain data, serializable as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEngineOutput {
    pub window: SearchWindow,
    /// ISO week of the window start.
    pub iso_week: u32,
    /// ISO week-numbering year of the window start.
    pub year: i32,
    /// All events, most significant first.
    pub highlights: Vec<Event>,
    pub forecasts: Vec<DailyForecast>,
    pub category_rankings: BTreeMap<ScoringCategory, CategoryRanking>,
    pub sign_ingresses: Vec<SignIngressEvent>,
    pub retrograde_stations: Vec<StationEvent>,
    pub aspects: Vec<AspectEvent>,
    pub moon_phases: Vec<MoonPhaseEvent>,
    pub seasonal_events: Vec<SeasonalEvent>,
    pub timing: TimingGuide,
    pub diagnostics: Diagnostics,
}

impl WeeklyEngineOutput {
    pub fn event_count(&self) -> usize {
        self.highlights.len()
    }
}

/// Oracle, cache and configuration bound together for repeated runs.
///
/// The cache is borrowed, so several engines (or successive calls) can share
/// one and benefit from earlier samples.
pub struct WeeklyEngine<'a> {
    oracle: &'a dyn PositionOracle,
    cache: &'a PositionCache,
    config: EngineConfig,
}

impl std::fmt::Debug for WeeklyEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeeklyEngine")
            .field("cache", self.cache)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> WeeklyEngine<'a> {
    /// Engine with the default configuration.
    pub fn new(oracle: &'a dyn PositionOracle, cache: &'a PositionCache) -> Self {
        Self::with_config(oracle, cache, EngineConfig::default())
    }

    pub fn with_config(
        oracle: &'a dyn PositionOracle,
        cache: &'a PositionCache,
        config: EngineConfig,
    ) -> Self {
        Self {
            oracle,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn check_inputs(
        &self,
        window: &SearchWindow,
        observer: &Observer,
        bodies: &[Body],
    ) -> Result<(), ConfigurationError> {
        self.config.validate()?;
        if let Err(CoreError::InvalidObserver(msg)) = observer.validate() {
            return Err(ConfigurationError::InvalidObserver(msg));
        }
        if bodies.is_empty() {
            return Err(ConfigurationError::EmptyBodyList);
        }
        if window.first_day() > window.last_day() {
            return Err(ConfigurationError::InvertedWindow);
        }
        if !window.is_representable() {
            return Err(ConfigurationError::WindowOutOfRange);
        }
        let max = self.config.sampling.max_window_days;
        if window.day_count() > i64::from(max) {
            return Err(ConfigurationError::WindowTooLong {
                days: window.day_count(),
                max,
            });
        }
        Ok(())
    }

    /// Detect, rank, synthesize and score everything in `window`.
    ///
    /// Inputs are checked before any sampling. Individual sample failures
    /// are skipped and reported in `diagnostics`; only a window in which
    /// every sample failed is an error.
    #[instrument(skip_all, fields(start = %window.first_day(), end = %window.last_day()))]
    pub fn generate(
        &self,
        window: &SearchWindow,
        observer: &Observer,
        bodies: &[Body],
    ) -> Result<WeeklyEngineOutput, EngineError> {
        self.check_inputs(window, observer, bodies)?;

        let mut bodies = bodies.to_vec();
        bodies.sort_unstable();
        bodies.dedup();
        let aspect_bodies: Vec<Body> = bodies
            .iter()
            .copied()
            .filter(|b| self.config.aspect_bodies.contains(b))
            .collect();

        let eph = Ephemeris::new(self.oracle, self.cache, *observer);
        let tables = &self.config.significance;
        let sampling = &self.config.sampling;
        let mut diag = Diagnostics::new();

        let sign_ingresses = search_sign_ingresses(&eph, window, &bodies, tables, &mut diag);
        let retrograde_stations = search_stations(&eph, window, &bodies, tables, &mut diag);
        let aspects = search_aspects(
            &eph,
            window,
            &aspect_bodies,
            &self.config.aspect_table,
            &sampling.aspect_search(),
            tables,
            &mut diag,
        )?;
        let moon_phases =
            search_moon_phases(&eph, window, &sampling.lunar_phase(), tables, &mut diag)?;
        let seasonal_events = seasonal_markers(window, tables);

        let mut events: Vec<Event> = Vec::new();
        events.extend(sign_ingresses.iter().cloned().map(Event::SignIngress));
        events.extend(retrograde_stations.iter().cloned().map(Event::RetrogradeStation));
        events.extend(aspects.iter().cloned().map(Event::Aspect));
        events.extend(moon_phases.iter().cloned().map(Event::MoonPhase));
        events.extend(seasonal_events.iter().cloned().map(Event::Seasonal));
        // Stable: equal instants keep detector order.
        events.sort_by_key(Event::instant);

        let forecasts = synthesize_forecasts(&eph, window, &bodies, &events, &mut diag);

        if diag.is_total_failure() {
            return Err(EngineError::OracleUnavailable {
                attempted: diag.attempted,
                first_error: diag.failures.first().map(|f| f.message.clone()),
            });
        }

        let category_rankings =
            score_categories(&self.config.scoring, &forecasts, sampling.top_days);
        let timing = timing_guide(&forecasts, &moon_phases);
        let highlights = rank_events(events);

        let iso = window.first_day().iso_week();
        info!(
            days = window.day_count(),
            events = highlights.len(),
            failed_samples = diag.failed,
            cache_len = self.cache.len(),
            "generated weekly output"
        );

        Ok(WeeklyEngineOutput {
            window: *window,
            iso_week: iso.week(),
            year: iso.year(),
            highlights,
            forecasts,
            category_rankings,
            sign_ingresses,
            retrograde_stations,
            aspects,
            moon_phases,
            seasonal_events,
            timing,
            diagnostics: diag,
        })
    }
}

/// One-shot [`WeeklyEngine::generate`] with an explicit configuration.
pub fn generate(
    oracle: &dyn PositionOracle,
    cache: &PositionCache,
    config: &EngineConfig,
    window: &SearchWindow,
    observer: &Observer,
    bodies: &[Body],
) -> Result<WeeklyEngineOutput, EngineError> {
    WeeklyEngine::with_config(oracle, cache, config.clone()).generate(window, observer, bodies)
}
