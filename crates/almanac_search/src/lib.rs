//! Event search over a window of UTC calendar days.
//!
//! This crate provides:
//! - Sign ingress and retrograde station detection from daily samples
//! - Aspect detection with per-(pair, kind) deduplication
//! - Principal moon phase detection with run suppression
//! - Fixed-date seasonal markers
//! - Significance ranking of the merged event list
//!
//! Detectors are best-effort: a failed sample is skipped and recorded in
//! [`Diagnostics`], never an error.

pub mod aspect;
pub mod aspect_types;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod ingress;
pub mod lunar_phase;
pub mod ranking;
pub mod seasonal;
pub mod stationary;
pub mod window;

pub use aspect::{body_pairs, search_aspects};
pub use aspect_types::{AspectDefinition, AspectSearchConfig, AspectTable};
pub use diagnostics::{Detector, Diagnostics, SampleFailure};
pub use error::SearchError;
pub use event::{
    AspectEvent, Event, MoonPhaseEvent, SeasonalEvent, SignIngressEvent, StationAction,
    StationEvent,
};
pub use ingress::search_sign_ingresses;
pub use lunar_phase::{LunarPhaseConfig, search_moon_phases};
pub use ranking::rank_events;
pub use seasonal::{SEASONAL_MARKERS, seasonal_markers};
pub use stationary::search_stations;
pub use window::{SearchWindow, day_start};
