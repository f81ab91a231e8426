//! Classification layer between raw longitudes and events.
//!
//! This crate provides:
//! - Zodiac sign partition and DMS formatting
//! - Angle arithmetic and retrograde detection with 0/360 wraparound
//! - Lunar phase classification and traditional full moon names
//! - Weekday rulers and seasonal marker kinds
//! - Significance tiers and their configurable lookup tables
//! - Ephemeris snapshots built on `almanac_core`

pub mod aspect_kind;
pub mod calendar;
pub mod moon_phase;
pub mod motion;
pub mod sign;
pub mod significance;
pub mod snapshot;

pub use aspect_kind::AspectKind;
pub use calendar::{SeasonalKind, day_ruler, weekday_name};
pub use moon_phase::{
    MAJOR_PHASE_HALF_WIDTH_DEG, MoonPhase, phase_angle, traditional_full_moon_name,
};
pub use motion::{angular_separation, is_retrograde, normalize_360, normalize_to_pm180};
pub use sign::{
    ALL_SIGNS, Dms, Element, Sign, SignInfo, deg_to_dms, sign_from_longitude, sign_index,
    sign_of,
};
pub use significance::{
    AspectSignificance, BodySignificance, BodyTable, PhaseSignificance, SeasonalSignificance,
    Significance, SignificanceTables,
};
pub use snapshot::{BodyPosition, EphemerisSnapshot};
