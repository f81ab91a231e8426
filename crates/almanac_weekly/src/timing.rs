//! Timing guide: power days, moon sign transitions and weekday rulers.

use almanac_base::{MoonPhase, Sign};
use almanac_core::Body;
use almanac_search::{MoonPhaseEvent, day_start};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::forecast::DailyForecast;

/// Hour of the earlier day at which a sign-change window opens.
const SIGN_CHANGE_OPEN_HOUR: i64 = 18;
/// Hour of the later day at which it closes.
const SIGN_CHANGE_CLOSE_HOUR: i64 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerDay {
    pub date: NaiveDate,
    pub phase: MoonPhase,
}

/// The Moon changed sign between two consecutive daily samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonSignChange {
    pub from_sign: Sign,
    pub to_sign: Sign,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerDays {
    pub body: Body,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingGuide {
    pub power_days: Vec<PowerDay>,
    pub moon_sign_changes: Vec<MoonSignChange>,
    pub ruler_days: Vec<RulerDays>,
}

/// New and Full Moon dates, chronological.
fn power_days(phases: &[MoonPhaseEvent]) -> Vec<PowerDay> {
    phases
        .iter()
        .filter(|p| matches!(p.phase, MoonPhase::NewMoon | MoonPhase::FullMoon))
        .map(|p| PowerDay {
            date: p.date,
            phase: p.phase,
        })
        .collect()
}

/// Transitions between consecutive forecasts. Days whose Moon could not be
/// sampled break the chain.
fn moon_sign_changes(forecasts: &[DailyForecast]) -> Vec<MoonSignChange> {
    forecasts
        .windows(2)
        .filter_map(|pair| {
            let (earlier, later) = (&pair[0], &pair[1]);
            let (Some(from_sign), Some(to_sign)) = (earlier.moon_sign, later.moon_sign) else {
                return None;
            };
            if from_sign == to_sign {
                return None;
            }
            Some(MoonSignChange {
                from_sign,
                to_sign,
                window_start: day_start(earlier.date)
                    .checked_add_signed(Duration::hours(SIGN_CHANGE_OPEN_HOUR))?,
                window_end: day_start(later.date)
                    .checked_add_signed(Duration::hours(SIGN_CHANGE_CLOSE_HOUR))?,
            })
        })
        .collect()
}

/// Ruling bodies in order of first appearance, each with its dates.
fn ruler_days(forecasts: &[DailyForecast]) -> Vec<RulerDays> {
    let mut out: Vec<RulerDays> = Vec::new();
    for f in forecasts {
        match out.iter_mut().find(|r| r.body == f.ruling_body) {
            Some(r) => r.dates.push(f.date),
            None => out.push(RulerDays {
                body: f.ruling_body,
                dates: vec![f.date],
            }),
        }
    }
    out
}

pub fn timing_guide(forecasts: &[DailyForecast], phases: &[MoonPhaseEvent]) -> TimingGuide {
    TimingGuide {
        power_days: power_days(phases),
        moon_sign_changes: moon_sign_changes(forecasts),
        ruler_days: ruler_days(forecasts),
    }
}
