//! Engine configuration: overridable tables and sampling parameters.
//!
//! Every field has a default, so a TOML override only needs the keys it
//! changes:
//!
//! ```toml
//! aspect_bodies = ["Sun", "Moon", "Venus", "Mars"]
//!
//! [sampling]
//! top_days = 3
//! ```

use almanac_core::Body;
use almanac_base::SignificanceTables;
use almanac_search::{AspectSearchConfig, AspectTable, LunarPhaseConfig};
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::scoring_types::CategoryWeightTable;

/// Sample spacing, dedup window and output limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub aspect_step_hours: u32,
    pub moon_step_hours: u32,
    pub aspect_dedup_hours: u32,
    pub major_phase_half_width_deg: f64,
    /// Ranked days kept per category.
    pub top_days: usize,
    /// Longest accepted window, in days.
    pub max_window_days: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            aspect_step_hours: 6,
            moon_step_hours: 6,
            aspect_dedup_hours: 24,
            major_phase_half_width_deg: 5.0,
            top_days: 5,
            max_window_days: 366,
        }
    }
}

impl SamplingConfig {
    pub fn aspect_search(&self) -> AspectSearchConfig {
        AspectSearchConfig {
            step_hours: self.aspect_step_hours,
            dedup_hours: self.aspect_dedup_hours,
        }
    }

    pub fn lunar_phase(&self) -> LunarPhaseConfig {
        LunarPhaseConfig {
            step_hours: self.moon_step_hours,
            major_half_width_deg: self.major_phase_half_width_deg,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        self.aspect_search().validate()?;
        self.lunar_phase().validate()?;
        if self.top_days == 0 {
            return Err("top_days must be > 0");
        }
        if self.max_window_days == 0 {
            return Err("max_window_days must be > 0");
        }
        Ok(())
    }
}

/// Everything [`crate::WeeklyEngine`] needs besides the oracle and cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub aspect_table: AspectTable,
    /// Bodies considered for aspects, intersected with the requested bodies.
    pub aspect_bodies: Vec<Body>,
    pub scoring: CategoryWeightTable,
    pub significance: SignificanceTables,
    pub sampling: SamplingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aspect_table: AspectTable::default(),
            aspect_bodies: Body::CLASSICAL.to_vec(),
            scoring: CategoryWeightTable::default(),
            significance: SignificanceTables::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with the keys present in `s`, then validated.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigurationError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.aspect_table
            .validate()
            .map_err(ConfigurationError::InvalidAspectTable)?;
        self.sampling
            .validate()
            .map_err(ConfigurationError::InvalidSampling)?;
        self.scoring
            .validate()
            .map_err(ConfigurationError::InvalidScoring)?;
        Ok(())
    }
}
