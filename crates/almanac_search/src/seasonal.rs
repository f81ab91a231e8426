//! Fixed-date seasonal markers: equinoxes, solstices and cross-quarter days.
//!
//! Dates are calendar approximations, the same every year. No ephemeris
//! sampling is involved.

use almanac_base::{SeasonalKind, SignificanceTables};
use chrono::{Datelike, NaiveDate};

use crate::event::SeasonalEvent;
use crate::window::{SearchWindow, day_start};

/// (name, month, day, kind) in calendar order.
pub const SEASONAL_MARKERS: [(&str, u32, u32, SeasonalKind); 8] = [
    ("Imbolc", 2, 1, SeasonalKind::CrossQuarter),
    ("Spring Equinox", 3, 21, SeasonalKind::Equinox),
    ("Beltane", 5, 1, SeasonalKind::CrossQuarter),
    ("Summer Solstice", 6, 21, SeasonalKind::Solstice),
    ("Lammas", 8, 1, SeasonalKind::CrossQuarter),
    ("Autumn Equinox", 9, 21, SeasonalKind::Equinox),
    ("Samhain", 10, 31, SeasonalKind::CrossQuarter),
    ("Winter Solstice", 12, 21, SeasonalKind::Solstice),
];

/// Markers falling inside the window, chronological. Every calendar year
/// the window touches is checked.
pub fn seasonal_markers(window: &SearchWindow, tables: &SignificanceTables) -> Vec<SeasonalEvent> {
    let mut events = Vec::new();
    for year in window.first_day().year()..=window.last_day().year() {
        for (name, month, day, marker) in SEASONAL_MARKERS {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            if window.contains_date(date) {
                events.push(SeasonalEvent {
                    name: name.to_string(),
                    date,
                    instant: day_start(date),
                    marker,
                    significance: tables.seasonal(marker),
                });
            }
        }
    }
    events
}
