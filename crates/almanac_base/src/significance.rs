//! Event significance tiers and the lookup tables that assign them.
//!
//! The tables are plain data so a caller can override any mapping through
//! configuration without touching detection code.

use almanac_core::Body;
use serde::{Deserialize, Serialize};

use crate::aspect_kind::AspectKind;
use crate::calendar::SeasonalKind;
use crate::moon_phase::MoonPhase;

/// Totally ordered tier: low < medium < high < extraordinary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    #[default]
    Low,
    Medium,
    High,
    Extraordinary,
}

impl Significance {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extraordinary => "extraordinary",
        }
    }
}

/// One row of a per-body table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodySignificance {
    pub body: Body,
    pub level: Significance,
}

/// Per-body lookup with a fallback for bodies not listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyTable {
    pub entries: Vec<BodySignificance>,
    pub default: Significance,
}

impl BodyTable {
    pub fn new(default: Significance, entries: &[(Body, Significance)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(body, level)| BodySignificance { body, level })
                .collect(),
            default,
        }
    }

    /// First listed level for `body`, else the default.
    pub fn lookup(&self, body: Body) -> Significance {
        self.entries
            .iter()
            .find(|e| e.body == body)
            .map(|e| e.level)
            .unwrap_or(self.default)
    }
}

/// Aspect tiers. Checked in field order: Jupiter-Saturn conjunction, any
/// outer-planet participant, then by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectSignificance {
    pub jupiter_saturn_conjunction: Significance,
    pub outer_planet: Significance,
    /// Conjunction, square, trine, opposition.
    pub major: Significance,
    pub sextile: Significance,
}

impl Default for AspectSignificance {
    fn default() -> Self {
        Self {
            jupiter_saturn_conjunction: Significance::Extraordinary,
            outer_planet: Significance::High,
            major: Significance::High,
            sextile: Significance::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSignificance {
    /// New and full moon.
    pub lunation: Significance,
    /// First and last quarter.
    pub quarter: Significance,
}

impl Default for PhaseSignificance {
    fn default() -> Self {
        Self {
            lunation: Significance::High,
            quarter: Significance::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalSignificance {
    /// Equinoxes and solstices.
    pub solar: Significance,
    pub cross_quarter: Significance,
}

impl Default for SeasonalSignificance {
    fn default() -> Self {
        Self {
            solar: Significance::High,
            cross_quarter: Significance::Medium,
        }
    }
}

/// All significance lookups used by the detectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignificanceTables {
    pub ingress: BodyTable,
    pub station: BodyTable,
    pub aspect: AspectSignificance,
    pub moon_phase: PhaseSignificance,
    pub seasonal: SeasonalSignificance,
}

impl Default for SignificanceTables {
    fn default() -> Self {
        use Significance::*;
        Self {
            ingress: BodyTable::new(
                Low,
                &[
                    (Body::Sun, Medium),
                    (Body::Moon, Low),
                    (Body::Mercury, Low),
                    (Body::Venus, Medium),
                    (Body::Mars, Medium),
                    (Body::Jupiter, High),
                    (Body::Saturn, High),
                    (Body::Uranus, Extraordinary),
                    (Body::Neptune, Extraordinary),
                    (Body::Pluto, Extraordinary),
                ],
            ),
            station: BodyTable::new(
                Low,
                &[(Body::Mercury, High), (Body::Venus, Medium), (Body::Mars, Medium)],
            ),
            aspect: AspectSignificance::default(),
            moon_phase: PhaseSignificance::default(),
            seasonal: SeasonalSignificance::default(),
        }
    }
}

impl SignificanceTables {
    pub fn ingress(&self, body: Body) -> Significance {
        self.ingress.lookup(body)
    }

    pub fn station(&self, body: Body) -> Significance {
        self.station.lookup(body)
    }

    pub fn aspect(&self, a: Body, b: Body, kind: AspectKind) -> Significance {
        let t = &self.aspect;
        let jup_sat = matches!(
            (a, b),
            (Body::Jupiter, Body::Saturn) | (Body::Saturn, Body::Jupiter)
        );
        if jup_sat && kind == AspectKind::Conjunction {
            t.jupiter_saturn_conjunction
        } else if a.is_outer() || b.is_outer() {
            t.outer_planet
        } else if kind == AspectKind::Sextile {
            t.sextile
        } else {
            t.major
        }
    }

    /// Tier of a principal phase; intermediate phases are low.
    pub fn moon_phase(&self, phase: MoonPhase) -> Significance {
        match phase {
            MoonPhase::NewMoon | MoonPhase::FullMoon => self.moon_phase.lunation,
            MoonPhase::FirstQuarter | MoonPhase::LastQuarter => self.moon_phase.quarter,
            _ => Significance::Low,
        }
    }

    pub fn seasonal(&self, kind: SeasonalKind) -> Significance {
        if kind.is_solar() {
            self.seasonal.solar
        } else {
            self.seasonal.cross_quarter
        }
    }
}
