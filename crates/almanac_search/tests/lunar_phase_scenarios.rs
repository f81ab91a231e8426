//! Integration tests for principal moon phase detection.

use almanac_base::{MoonPhase, Significance, SignificanceTables};
use almanac_core::{Body, Ephemeris, Observer, OracleError, PositionCache, PositionOracle};
use almanac_search::{
    Diagnostics, LunarPhaseConfig, MoonPhaseEvent, SearchWindow, search_moon_phases,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()
}

fn window(days: u32) -> SearchWindow {
    let first = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    SearchWindow::from_dates(first, first + chrono::Duration::days(i64::from(days) - 1)).unwrap()
}

fn hours(t: DateTime<Utc>) -> f64 {
    (t - start()).num_seconds() as f64 / 3600.0
}

fn detect(oracle: &dyn PositionOracle, w: &SearchWindow) -> (Vec<MoonPhaseEvent>, Diagnostics) {
    let cache = PositionCache::default();
    let eph = Ephemeris::new(oracle, &cache, Observer::greenwich());
    let mut diag = Diagnostics::new();
    let events = search_moon_phases(
        &eph,
        w,
        &LunarPhaseConfig::default(),
        &SignificanceTables::default(),
        &mut diag,
    )
    .unwrap();
    (events, diag)
}

/// Sun fixed at 0; Moon at 170 advancing 0.5 deg/hour, so samples at
/// 12h, 18h, 24h and 30h (176, 179, 182, 185) all sit in the full window.
fn slow_full(body: Body, t: DateTime<Utc>, _o: &Observer) -> Result<f64, OracleError> {
    match body {
        Body::Sun => Ok(0.0),
        _ => Ok(170.0 + 0.5 * hours(t)),
    }
}

#[test]
fn full_moon_emitted_once_at_first_sample() {
    let (events, _) = detect(&slow_full, &window(2));
    assert_eq!(events.len(), 1);
    let e = &events[0];
    assert_eq!(e.phase, MoonPhase::FullMoon);
    assert!(e.is_major);
    assert_eq!(e.instant, Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap());
    assert_eq!(e.traditional_name.as_deref(), Some("Harvest Moon"));
    assert_eq!(e.significance, Significance::High);
    assert!((e.phase_angle_deg - 176.0).abs() < 1e-9);
}

/// Moon 20 deg ahead of a fixed Sun, gaining 12.19 deg/day.
fn synodic(body: Body, t: DateTime<Utc>, _o: &Observer) -> Result<f64, OracleError> {
    match body {
        Body::Sun => Ok(0.0),
        _ => Ok(20.0 + 12.19 * hours(t) / 24.0),
    }
}

#[test]
fn one_event_per_principal_phase_over_a_cycle() {
    let (events, diag) = detect(&synodic, &window(30));
    let phases: Vec<MoonPhase> = events.iter().map(|e| e.phase).collect();
    assert_eq!(
        phases,
        vec![
            MoonPhase::FirstQuarter,
            MoonPhase::FullMoon,
            MoonPhase::LastQuarter,
            MoonPhase::NewMoon,
        ]
    );
    assert_eq!(events[2].significance, Significance::Medium);
    assert!(events.iter().all(|e| e.is_major));
    assert!(events[0].traditional_name.is_none());
    assert_eq!(diag.attempted, 30 * 4 * 2);
}

#[test]
fn failed_sample_does_not_split_a_run() {
    let gap = start() + chrono::Duration::hours(18);
    let oracle = move |b: Body, t: DateTime<Utc>, o: &Observer| -> Result<f64, OracleError> {
        if t == gap && b == Body::Sun {
            Err(OracleError::new("gap"))
        } else {
            slow_full(b, t, o)
        }
    };
    let (events, diag) = detect(&oracle, &window(2));
    assert_eq!(events.len(), 1);
    assert_eq!(diag.failed, 1);
}

#[test]
fn quiet_window_is_empty() {
    // Moon stays in the waxing crescent arc.
    let crescent = |b: Body, _t: DateTime<Utc>, _o: &Observer| -> Result<f64, OracleError> {
        Ok(if b == Body::Sun { 100.0 } else { 140.0 })
    };
    let (events, _) = detect(&crescent, &window(7));
    assert!(events.is_empty());
}
