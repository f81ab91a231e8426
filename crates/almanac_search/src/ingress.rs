//! Sign ingress detection from daily samples.
//!
//! Each body is sampled at 00:00 UTC of every window day and of the day
//! after the window. A sign change between day d and d+1 is attributed to
//! d. Only transitions completing within one daily step are seen.

use almanac_base::{SignificanceTables, sign_of};
use almanac_core::{Body, Ephemeris};
use chrono::Duration;
use tracing::{debug, instrument};

use crate::diagnostics::{Detector, Diagnostics};
use crate::event::SignIngressEvent;
use crate::window::{SearchWindow, day_start};

/// Sun and Moon are excluded: the Sun's ingress is annual and the Moon
/// changes sign every two to three days.
fn tracks_ingress(body: Body) -> bool {
    !body.is_luminary()
}

/// Sign ingresses of `bodies` within the window, chronological per body.
#[instrument(skip_all, fields(bodies = bodies.len()))]
pub fn search_sign_ingresses(
    eph: &Ephemeris<'_>,
    window: &SearchWindow,
    bodies: &[Body],
    tables: &SignificanceTables,
    diag: &mut Diagnostics,
) -> Vec<SignIngressEvent> {
    let days = window.days();
    let mut events = Vec::new();

    for &body in bodies.iter().filter(|b| tracks_ingress(**b)) {
        // days plus the day after the window
        let series: Vec<Option<f64>> = days
            .iter()
            .map(|d| Some(day_start(*d)))
            .chain(std::iter::once(
                day_start(window.last_day()).checked_add_signed(Duration::days(1)),
            ))
            .map(|t| t.and_then(|t| diag.observe(Detector::SignIngress, t, eph.longitude(body, t))))
            .collect();

        for (i, date) in days.iter().enumerate() {
            let (Some(today), Some(tomorrow)) = (series[i], series[i + 1]) else {
                continue;
            };
            let from_sign = sign_of(today);
            let to_sign = sign_of(tomorrow);
            if from_sign != to_sign {
                events.push(SignIngressEvent {
                    body,
                    date: *date,
                    instant: day_start(*date),
                    from_sign,
                    to_sign,
                    significance: tables.ingress(body),
                });
            }
        }
    }

    events.sort_by_key(|e| (e.instant, e.body));
    debug!(count = events.len(), "sign ingresses");
    events
}
