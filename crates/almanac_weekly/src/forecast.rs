//! Per-day forecast records: the join point of sampled state and events.

use almanac_base::{BodyPosition, EphemerisSnapshot, Sign, day_ruler, weekday_name};
use almanac_core::{Body, Ephemeris};
use almanac_search::{Detector, Diagnostics, Event, SearchWindow, day_start};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weekday: String,
    pub ruling_body: Body,
    /// `None` when the Moon could not be sampled for this day.
    pub moon_sign: Option<Sign>,
    /// Events dated this day, chronological.
    pub events: Vec<Event>,
    /// Retrograde at 00:00 UTC, Sun and Moon excluded.
    pub retrograde_bodies: Vec<Body>,
}

impl DailyForecast {
    pub fn aspects(&self) -> impl Iterator<Item = &almanac_search::AspectEvent> {
        self.events.iter().filter_map(|e| match e {
            Event::Aspect(a) => Some(a),
            _ => None,
        })
    }

    pub fn moon_phases(&self) -> impl Iterator<Item = &almanac_search::MoonPhaseEvent> {
        self.events.iter().filter_map(|e| match e {
            Event::MoonPhase(m) => Some(m),
            _ => None,
        })
    }
}

/// One forecast per window day.
///
/// The day's snapshot is taken at 00:00 UTC for `bodies` plus the Moon.
/// Each body is sampled on its own, so one failing body only drops itself
/// from the snapshot.
pub fn synthesize_forecasts(
    eph: &Ephemeris<'_>,
    window: &SearchWindow,
    bodies: &[Body],
    events: &[Event],
    diag: &mut Diagnostics,
) -> Vec<DailyForecast> {
    let mut snapshot_bodies: Vec<Body> = bodies.to_vec();
    if !snapshot_bodies.contains(&Body::Moon) {
        snapshot_bodies.push(Body::Moon);
    }

    let forecasts: Vec<DailyForecast> = window
        .days()
        .into_iter()
        .map(|date| {
            let instant = day_start(date);
            let positions = snapshot_bodies
                .iter()
                .filter_map(|&body| {
                    diag.observe(
                        Detector::Forecast,
                        instant,
                        BodyPosition::sample(eph, body, instant),
                    )
                })
                .collect();
            let snapshot = EphemerisSnapshot { instant, positions };
            let weekday = date.weekday();

            DailyForecast {
                date,
                weekday: weekday_name(weekday).to_string(),
                ruling_body: day_ruler(weekday),
                moon_sign: snapshot.sign_of(Body::Moon),
                events: events.iter().filter(|e| e.date() == date).cloned().collect(),
                retrograde_bodies: snapshot
                    .retrograde_bodies()
                    .into_iter()
                    .filter(|b| bodies.contains(b))
                    .collect(),
            }
        })
        .collect();

    debug!(days = forecasts.len(), "daily forecasts");
    forecasts
}
