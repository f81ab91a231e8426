//! Synodic phase angle and the eight named lunar phases.
//!
//! The phase angle is `(moon - sun) mod 360`: 0 new, 90 first quarter,
//! 180 full, 270 last quarter. The four principal phases occupy a window of
//! `±half_width` around their centre; the intermediate phases fill the arcs
//! between those windows.

use serde::{Deserialize, Serialize};

use crate::motion::normalize_360;

/// Default half-width of a principal phase window, degrees.
pub const MAJOR_PHASE_HALF_WIDTH_DEG: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// New, first quarter, full or last quarter.
    pub const fn is_major(self) -> bool {
        matches!(
            self,
            Self::NewMoon | Self::FirstQuarter | Self::FullMoon | Self::LastQuarter
        )
    }

    /// Centre of the phase window for principal phases.
    pub const fn centre_deg(self) -> Option<f64> {
        match self {
            Self::NewMoon => Some(0.0),
            Self::FirstQuarter => Some(90.0),
            Self::FullMoon => Some(180.0),
            Self::LastQuarter => Some(270.0),
            _ => None,
        }
    }

    /// Classify a phase angle. Principal windows are closed intervals.
    pub fn classify(phase_angle_deg: f64, half_width_deg: f64) -> MoonPhase {
        let theta = normalize_360(phase_angle_deg);
        if theta <= half_width_deg || theta >= 360.0 - half_width_deg {
            return Self::NewMoon;
        }
        for (centre, major) in [
            (90.0, Self::FirstQuarter),
            (180.0, Self::FullMoon),
            (270.0, Self::LastQuarter),
        ] {
            if (theta - centre).abs() <= half_width_deg {
                return major;
            }
        }
        match theta {
            t if t < 90.0 => Self::WaxingCrescent,
            t if t < 180.0 => Self::WaxingGibbous,
            t if t < 270.0 => Self::WaningGibbous,
            _ => Self::WaningCrescent,
        }
    }
}

impl std::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Synodic phase angle from Sun and Moon ecliptic longitudes.
pub fn phase_angle(sun_lon: f64, moon_lon: f64) -> f64 {
    normalize_360(moon_lon - sun_lon)
}

/// Traditional name of the full moon falling in a calendar month (1-12).
pub fn traditional_full_moon_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "Wolf Moon",
        "Snow Moon",
        "Worm Moon",
        "Pink Moon",
        "Flower Moon",
        "Strawberry Moon",
        "Buck Moon",
        "Sturgeon Moon",
        "Harvest Moon",
        "Hunter's Moon",
        "Beaver Moon",
        "Cold Moon",
    ];
    let idx = month.checked_sub(1)? as usize;
    NAMES.get(idx).copied()
}
