//! Integration tests for the position cache and sampler.
//!
//! Pure-math tests using closure oracles (no kernel files needed).

use std::sync::atomic::{AtomicUsize, Ordering};

use almanac_core::{Body, CoreError, Ephemeris, Observer, OracleError, PositionCache};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

/// Longitude advances one degree per hour from zero at `t0`.
fn hourly_oracle(body: Body, t: DateTime<Utc>, _o: &Observer) -> Result<f64, OracleError> {
    let hours = (t - t0()).num_hours() as f64;
    Ok(hours + body.index() as f64)
}

#[test]
fn fifo_capacity_respected_under_sampling() {
    let cache = PositionCache::new(3);
    let eph = Ephemeris::new(&hourly_oracle, &cache, Observer::greenwich());
    for h in 0..10 {
        eph.longitude(Body::Mars, t0() + Duration::hours(h)).unwrap();
    }
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.stats().evictions, 7);
    assert_eq!(cache.stats().misses, 10);
}

#[test]
fn failing_key_does_not_poison_others() {
    let bad = t0() + Duration::hours(5);
    let oracle = move |body: Body, t: DateTime<Utc>, o: &Observer| -> Result<f64, OracleError> {
        if t == bad && body == Body::Venus {
            Err(OracleError::new("no data"))
        } else {
            hourly_oracle(body, t, o)
        }
    };
    let cache = PositionCache::new(64);
    let eph = Ephemeris::new(&oracle, &cache, Observer::greenwich());

    let err = eph.longitude(Body::Venus, bad).unwrap_err();
    assert!(matches!(err, CoreError::Oracle { body: Body::Venus, .. }));
    assert_eq!(err.body(), Some(Body::Venus));

    // Same instant, other body; same body, other instant.
    assert!(eph.longitude(Body::Mars, bad).is_ok());
    assert!(eph.longitude(Body::Venus, bad + Duration::hours(1)).is_ok());
    // The failure is retried, not cached.
    assert!(eph.longitude(Body::Venus, bad).is_err());
    assert_eq!(cache.len(), 2);
}

#[test]
fn cached_and_uncached_agree() {
    let warm = PositionCache::new(1000);
    let cold = PositionCache::disabled();
    let obs = Observer::new(40.7, -74.0, 10.0);
    let a = Ephemeris::new(&hourly_oracle, &warm, obs);
    let b = Ephemeris::new(&hourly_oracle, &cold, obs);
    for m in (0..600).step_by(17) {
        let t = t0() + Duration::minutes(m);
        for body in Body::ALL {
            assert_eq!(a.longitude(body, t).unwrap(), b.longitude(body, t).unwrap());
        }
    }
    assert!(cold.is_empty());
}

#[test]
fn concurrent_readers_share_cache() {
    let calls = AtomicUsize::new(0);
    let oracle = |body: Body, t: DateTime<Utc>, o: &Observer| -> Result<f64, OracleError> {
        calls.fetch_add(1, Ordering::SeqCst);
        hourly_oracle(body, t, o)
    };
    let cache = PositionCache::new(1000);
    let eph = Ephemeris::new(&oracle, &cache, Observer::greenwich());

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for h in 0..24 {
                    eph.longitude(Body::Jupiter, t0() + Duration::hours(h)).unwrap();
                }
            });
        }
    });

    assert_eq!(cache.len(), 24);
    // Races may duplicate a computation, never lose or tear an entry.
    let n = calls.load(Ordering::SeqCst);
    assert!((24..=96).contains(&n), "oracle calls = {n}");
    let v = eph.longitude(Body::Jupiter, t0() + Duration::hours(23)).unwrap();
    assert!((v - (23.0 + Body::Jupiter.index() as f64)).abs() < 1e-12);
}
