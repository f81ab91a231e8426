//! Retrograde station detection from daily samples.
//!
//! Without velocity data a station shows up as a flip in the apparent
//! direction between consecutive daily steps. The direction on day d
//! compares d with d-1 (see [`almanac_base::is_retrograde`] for the 0/360
//! wraparound rule). When direction(d) and direction(d+1) differ the body
//! stationed during day d; the event takes the sign at d+1.

use almanac_base::{SignificanceTables, is_retrograde, sign_of};
use almanac_core::{Body, Ephemeris};
use chrono::Duration;
use tracing::{debug, instrument};

use crate::diagnostics::{Detector, Diagnostics};
use crate::event::{StationAction, StationEvent};
use crate::window::{SearchWindow, day_start};

/// Direction flag for each consecutive pair of samples.
fn directions(series: &[Option<f64>]) -> Vec<Option<bool>> {
    series
        .windows(2)
        .map(|w| match (w[0], w[1]) {
            (Some(prev), Some(now)) => Some(is_retrograde(now, prev)),
            _ => None,
        })
        .collect()
}

/// Retrograde stations of `bodies` within the window. Sun and Moon are
/// skipped; they never station geocentrically.
#[instrument(skip_all, fields(bodies = bodies.len()))]
pub fn search_stations(
    eph: &Ephemeris<'_>,
    window: &SearchWindow,
    bodies: &[Body],
    tables: &SignificanceTables,
    diag: &mut Diagnostics,
) -> Vec<StationEvent> {
    let days = window.days();
    let first = day_start(window.first_day());
    let mut events = Vec::new();

    for &body in bodies.iter().filter(|b| !b.is_luminary()) {
        // Index 0 is the day before the window; the last index the day after.
        let series: Vec<Option<f64>> = (-1..=days.len() as i64)
            .map(|offset| {
                first
                    .checked_add_signed(Duration::days(offset))
                    .and_then(|t| diag.observe(Detector::RetrogradeStation, t, eph.longitude(body, t)))
            })
            .collect();
        // dirs[i] is the direction on days[i]; dirs[i + 1] on the day after.
        let dirs = directions(&series);

        for (i, date) in days.iter().enumerate() {
            let (Some(today), Some(tomorrow)) = (dirs[i], dirs[i + 1]) else {
                continue;
            };
            if today == tomorrow {
                continue;
            }
            let Some(lon_next) = series[i + 2] else {
                continue;
            };
            events.push(StationEvent {
                body,
                date: *date,
                instant: day_start(*date),
                action: if tomorrow {
                    StationAction::Begins
                } else {
                    StationAction::Ends
                },
                sign: sign_of(lon_next),
                significance: tables.station(body),
            });
        }
    }

    events.sort_by_key(|e| (e.instant, e.body));
    debug!(count = events.len(), "retrograde stations");
    events
}
