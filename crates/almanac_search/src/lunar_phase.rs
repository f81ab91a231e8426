//! Principal lunar phase detection over fixed-step samples.
//!
//! The synodic angle `(moon - sun) mod 360` is classified at each sample. A
//! principal phase is emitted on the first sample of a run of samples sharing
//! that phase name; later samples in the same run are suppressed. A failed
//! sample leaves the run state unchanged.

use almanac_base::{
    MAJOR_PHASE_HALF_WIDTH_DEG, MoonPhase, SignificanceTables, phase_angle, sign_of,
    traditional_full_moon_name,
};
use almanac_core::{Body, Ephemeris};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::diagnostics::{Detector, Diagnostics};
use crate::error::SearchError;
use crate::event::MoonPhaseEvent;
use crate::window::SearchWindow;

/// Sampling parameters for phase search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarPhaseConfig {
    /// Hours between samples (default 6).
    pub step_hours: u32,
    /// Half-width of each principal phase window in degrees (default 5).
    pub major_half_width_deg: f64,
}

impl Default for LunarPhaseConfig {
    fn default() -> Self {
        Self {
            step_hours: 6,
            major_half_width_deg: MAJOR_PHASE_HALF_WIDTH_DEG,
        }
    }
}

impl LunarPhaseConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.step_hours == 0 {
            return Err("moon phase step_hours must be > 0");
        }
        if !self.major_half_width_deg.is_finite()
            || self.major_half_width_deg <= 0.0
            || self.major_half_width_deg >= 45.0
        {
            return Err("major_half_width_deg must be within (0, 45)");
        }
        Ok(())
    }
}

/// Principal moon phases within the window.
#[instrument(skip_all, fields(step_hours = config.step_hours))]
pub fn search_moon_phases(
    eph: &Ephemeris<'_>,
    window: &SearchWindow,
    config: &LunarPhaseConfig,
    tables: &SignificanceTables,
    diag: &mut Diagnostics,
) -> Result<Vec<MoonPhaseEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    let mut events = Vec::new();
    let mut last_phase: Option<MoonPhase> = None;

    for t in window.samples(config.step_hours) {
        let sun = diag.observe(Detector::MoonPhase, t, eph.longitude(Body::Sun, t));
        let moon = diag.observe(Detector::MoonPhase, t, eph.longitude(Body::Moon, t));
        let (Some(sun), Some(moon)) = (sun, moon) else {
            continue;
        };

        let theta = phase_angle(sun, moon);
        let phase = MoonPhase::classify(theta, config.major_half_width_deg);
        if phase.is_major() && last_phase != Some(phase) {
            let traditional_name = (phase == MoonPhase::FullMoon)
                .then(|| traditional_full_moon_name(t.month()))
                .flatten()
                .map(str::to_string);
            events.push(MoonPhaseEvent {
                phase,
                date: t.date_naive(),
                instant: t,
                sign: sign_of(moon),
                is_major: true,
                phase_angle_deg: theta,
                traditional_name,
                significance: tables.moon_phase(phase),
            });
        }
        last_phase = Some(phase);
    }

    debug!(count = events.len(), "moon phases");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        assert!(LunarPhaseConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_half_width() {
        let mut c = LunarPhaseConfig::default();
        c.major_half_width_deg = 0.0;
        assert!(c.validate().is_err());
        c.major_half_width_deg = 45.0;
        assert!(c.validate().is_err());
        c.major_half_width_deg = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_step() {
        let c = LunarPhaseConfig {
            step_hours: 0,
            ..LunarPhaseConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
