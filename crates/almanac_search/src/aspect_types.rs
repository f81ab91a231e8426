//! Types for aspect search: the orb table and sampling parameters.

use almanac_base::AspectKind;
use serde::{Deserialize, Serialize};

/// One row of an aspect table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    /// Exact separation in degrees, [0, 180].
    pub angle_deg: f64,
    /// Allowed deviation from `angle_deg`.
    pub orb_deg: f64,
}

impl AspectDefinition {
    pub fn new(kind: AspectKind, orb_deg: f64) -> Self {
        Self {
            kind,
            angle_deg: kind.exact_angle(),
            orb_deg,
        }
    }

    /// Deviation from exact if `separation_deg` is within orb.
    pub fn deviation(&self, separation_deg: f64) -> Option<f64> {
        let dev = (separation_deg - self.angle_deg).abs();
        (dev <= self.orb_deg).then_some(dev)
    }
}

/// Ordered aspect table; the first matching row wins.
///
/// Two orb presets exist and are kept separate on purpose: callers pick one
/// or supply their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AspectTable {
    pub entries: Vec<AspectDefinition>,
}

impl AspectTable {
    pub fn new(entries: Vec<AspectDefinition>) -> Self {
        Self { entries }
    }

    /// Weekly-forecast orbs: conjunction 8, sextile 6, square 8, trine 8,
    /// opposition 8.
    pub fn weekly() -> Self {
        Self::new(vec![
            AspectDefinition::new(AspectKind::Conjunction, 8.0),
            AspectDefinition::new(AspectKind::Sextile, 6.0),
            AspectDefinition::new(AspectKind::Square, 8.0),
            AspectDefinition::new(AspectKind::Trine, 8.0),
            AspectDefinition::new(AspectKind::Opposition, 8.0),
        ])
    }

    /// Call-to-action example orbs: conjunction 8, opposition 8, trine 6,
    /// square 6, sextile 5.
    pub fn cta() -> Self {
        Self::new(vec![
            AspectDefinition::new(AspectKind::Conjunction, 8.0),
            AspectDefinition::new(AspectKind::Opposition, 8.0),
            AspectDefinition::new(AspectKind::Trine, 6.0),
            AspectDefinition::new(AspectKind::Square, 6.0),
            AspectDefinition::new(AspectKind::Sextile, 5.0),
        ])
    }

    /// First row matching a separation, with its deviation from exact.
    pub fn find(&self, separation_deg: f64) -> Option<(&AspectDefinition, f64)> {
        self.entries
            .iter()
            .find_map(|d| d.deviation(separation_deg).map(|dev| (d, dev)))
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.entries.is_empty() {
            return Err("aspect table must not be empty");
        }
        for (i, d) in self.entries.iter().enumerate() {
            if !d.angle_deg.is_finite() || !(0.0..=180.0).contains(&d.angle_deg) {
                return Err("aspect angle_deg must be within [0, 180]");
            }
            if !d.orb_deg.is_finite() || d.orb_deg < 0.0 {
                return Err("aspect orb_deg must be finite and non-negative");
            }
            if self.entries[..i].iter().any(|e| e.kind == d.kind) {
                return Err("aspect kinds must be unique");
            }
        }
        Ok(())
    }
}

impl Default for AspectTable {
    fn default() -> Self {
        Self::weekly()
    }
}

/// Sampling parameters for aspect search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectSearchConfig {
    /// Hours between samples (default 6).
    pub step_hours: u32,
    /// A repeat of the same (pair, kind) this many hours or less after the
    /// last emission is suppressed (default 24).
    pub dedup_hours: u32,
}

impl Default for AspectSearchConfig {
    fn default() -> Self {
        Self {
            step_hours: 6,
            dedup_hours: 24,
        }
    }
}

impl AspectSearchConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.step_hours == 0 {
            return Err("aspect step_hours must be > 0");
        }
        Ok(())
    }
}
