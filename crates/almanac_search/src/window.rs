//! The calendar window a search runs over.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Inclusive window of UTC calendar days.
///
/// Only the dates of `start` and `end` matter: every day from
/// `start.date_naive()` through `end.date_naive()` is covered in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 00:00 UTC of a calendar day.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl SearchWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SearchError> {
        let w = Self { start, end };
        w.validate()?;
        Ok(w)
    }

    /// Window covering whole days `first ..= last`.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Result<Self, SearchError> {
        Self::new(day_start(first), day_start(last))
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.first_day() > self.last_day() {
            return Err(SearchError::InvalidConfig("window start is after window end"));
        }
        if !self.is_representable() {
            return Err(SearchError::InvalidConfig("window too close to the supported date range"));
        }
        Ok(())
    }

    /// Whether the day before the first day and the day after the last are
    /// both representable instants. Detectors sample one day beyond each end.
    pub fn is_representable(&self) -> bool {
        let pad = Duration::days(1);
        day_start(self.first_day()).checked_sub_signed(pad).is_some()
            && day_start(self.last_day()).checked_add_signed(pad).is_some()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Number of calendar days covered (at least 1 for a valid window).
    pub fn day_count(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }

    /// Calendar days in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take_while(|d| *d <= self.last_day())
            .collect()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// Instants every `step_hours` from 00:00 of the first day up to, but
    /// not including, 00:00 of the day after the last.
    pub fn samples(&self, step_hours: u32) -> Vec<DateTime<Utc>> {
        if step_hours == 0 {
            return Vec::new();
        }
        let step = Duration::hours(i64::from(step_hours));
        let Some(stop) = day_start(self.last_day()).checked_add_signed(Duration::days(1)) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut next = Some(day_start(self.first_day()));
        while let Some(t) = next.filter(|t| *t < stop) {
            out.push(t);
            next = t.checked_add_signed(step);
        }
        out
    }
}
