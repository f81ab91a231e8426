//! Integration tests for aspect search: exactness, dedup, orb presets and
//! best-effort sampling.

use almanac_base::{AspectKind, Significance, SignificanceTables};
use almanac_core::{Body, Ephemeris, Observer, OracleError, PositionCache, PositionOracle};
use almanac_search::{
    AspectEvent, AspectSearchConfig, AspectTable, Diagnostics, SearchError, SearchWindow,
    search_aspects,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

fn week() -> SearchWindow {
    SearchWindow::from_dates(
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
        NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
    )
    .unwrap()
}

/// Fixed positions: Sun 10 and Mars 130 are trine, Moon 70 is sextile the
/// Sun, Venus 236 aspects neither Sun nor Mars.
fn fixed(body: Body, _t: DateTime<Utc>, _o: &Observer) -> Result<f64, OracleError> {
    Ok(match body {
        Body::Sun => 10.0,
        Body::Moon => 70.0,
        Body::Mars => 130.0,
        Body::Venus => 236.0,
        _ => 300.0,
    })
}

fn run(
    oracle: &dyn PositionOracle,
    bodies: &[Body],
    table: &AspectTable,
) -> (Vec<AspectEvent>, Diagnostics) {
    let cache = PositionCache::default();
    let eph = Ephemeris::new(oracle, &cache, Observer::greenwich());
    let mut diag = Diagnostics::new();
    let events = search_aspects(
        &eph,
        &week(),
        bodies,
        table,
        &AspectSearchConfig::default(),
        &SignificanceTables::default(),
        &mut diag,
    )
    .unwrap();
    (events, diag)
}

#[test]
fn exact_trine_detected() {
    let (events, _) = run(&fixed, &[Body::Sun, Body::Mars], &AspectTable::weekly());
    let first = &events[0];
    assert_eq!(first.aspect, AspectKind::Trine);
    assert_eq!((first.body_a, first.body_b), (Body::Sun, Body::Mars));
    assert!((first.separation_deg - 120.0).abs() < 1e-9);
    assert!(first.orb_deg.abs() < 1e-9);
    assert_eq!(first.approx_time, NaiveTime::MIN);
    assert_eq!(first.significance, Significance::High);
}

#[test]
fn persistent_aspect_deduplicated_to_24h() {
    let (events, _) = run(&fixed, &[Body::Sun, Body::Mars], &AspectTable::weekly());
    // 0, 30, 60, 90, 120, 150 hours
    assert_eq!(events.len(), 6);
    for w in events.windows(2) {
        assert!(w[1].instant - w[0].instant > Duration::hours(24));
    }
    assert_eq!(
        events[1].instant,
        Utc.with_ymd_and_hms(2025, 8, 5, 6, 0, 0).unwrap()
    );
}

#[test]
fn sun_and_moon_pair_with_each_other() {
    let (events, _) = run(&fixed, &[Body::Sun, Body::Moon], &AspectTable::weekly());
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.aspect == AspectKind::Sextile));
    assert_eq!(events[0].significance, Significance::Medium);
}

#[test]
fn orb_presets_disagree_at_66_degrees() {
    let wide = |b: Body, _t: DateTime<Utc>, _o: &Observer| -> Result<f64, OracleError> {
        Ok(if b == Body::Sun { 0.0 } else { 66.0 })
    };
    let (weekly, _) = run(&wide, &[Body::Sun, Body::Jupiter], &AspectTable::weekly());
    let (cta, _) = run(&wide, &[Body::Sun, Body::Jupiter], &AspectTable::cta());
    assert!(!weekly.is_empty());
    assert!(cta.is_empty());
}

#[test]
fn no_aspect_is_valid_output() {
    let (events, diag) = run(&fixed, &[Body::Mars, Body::Venus], &AspectTable::weekly());
    assert!(events.is_empty());
    assert!(diag.is_clean());
}

#[test]
fn failing_body_does_not_block_other_pairs() {
    let oracle = |b: Body, t: DateTime<Utc>, o: &Observer| -> Result<f64, OracleError> {
        if b == Body::Venus {
            Err(OracleError::new("no Venus data"))
        } else {
            fixed(b, t, o)
        }
    };
    let (events, diag) = run(
        &oracle,
        &[Body::Sun, Body::Venus, Body::Mars],
        &AspectTable::weekly(),
    );
    assert_eq!(events.len(), 6);
    assert_eq!(diag.failed, 28);
    assert_eq!(diag.attempted, 28 * 3);
}

#[test]
fn invalid_table_rejected() {
    let cache = PositionCache::default();
    let eph = Ephemeris::new(&fixed, &cache, Observer::greenwich());
    let mut diag = Diagnostics::new();
    let err = search_aspects(
        &eph,
        &week(),
        &[Body::Sun, Body::Mars],
        &AspectTable::new(Vec::new()),
        &AspectSearchConfig::default(),
        &SignificanceTables::default(),
        &mut diag,
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::InvalidConfig(_)));
    assert_eq!(diag.attempted, 0);
}
