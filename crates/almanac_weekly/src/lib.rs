//! Weekly generation: daily forecasts, best-day scoring, timing guide and
//! the [`generate`] entry point.
//!
//! ```rust,ignore
//! use almanac_weekly::*;
//!
//! let cache = PositionCache::new(PositionCache::DEFAULT_CAPACITY);
//! let engine = WeeklyEngine::new(&my_oracle, &cache);
//! let window = SearchWindow::from_dates(monday, sunday)?;
//! let out = engine.generate(&window, &Observer::greenwich(), &Body::ALL)?;
//! println!("{}", out.category_rankings[&ScoringCategory::Love].summary);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod scoring;
pub mod scoring_types;
pub mod timing;

pub use config::{EngineConfig, SamplingConfig};
pub use engine::{WeeklyEngine, WeeklyEngineOutput, generate};
pub use error::{ConfigurationError, EngineError};
pub use forecast::{DailyForecast, synthesize_forecasts};
pub use scoring::{rank_category, score_categories, score_day, summarize};
pub use scoring_types::{
    CategoryRanking, CategoryRules, CategoryWeightTable, MoonSignRule, PairAspectRule,
    PatronAspectRule, PhaseRule, RankedDay, Reason, RulerRule, ScoringCategory, Tier,
};
pub use timing::{MoonSignChange, PowerDay, RulerDays, TimingGuide, timing_guide};

// Re-exported so callers can drive the engine with this crate alone.
pub use almanac_core::{Body, Observer, OracleError, PositionCache, PositionOracle};
pub use almanac_search::{Event, SearchWindow};
