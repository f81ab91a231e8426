//! Position oracle contract and the hour-quantized sampler built on it.

use chrono::{DateTime, Utc};

use crate::body::Body;
use crate::cache::{CacheKey, PositionCache};
use crate::error::{CoreError, OracleError};
use crate::observer::Observer;

const SECONDS_PER_HOUR: i64 = 3600;

/// Supplied ephemeris function: geocentric ecliptic longitude of a body.
///
/// Implementations must be deterministic for a given input. Any closure
/// with the matching signature is an oracle:
///
/// ```rust,ignore
/// let oracle = |body: Body, _t: DateTime<Utc>, _o: &Observer| -> Result<f64, OracleError> {
///     Ok(body.index() as f64 * 30.0)
/// };
/// ```
pub trait PositionOracle: Send + Sync {
    /// Ecliptic longitude in degrees. Values outside [0, 360) are normalized
    /// by the sampler; non-finite values are rejected.
    fn ecliptic_longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<f64, OracleError>;
}

impl<F> PositionOracle for F
where
    F: Fn(Body, DateTime<Utc>, &Observer) -> Result<f64, OracleError> + Send + Sync,
{
    fn ecliptic_longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<f64, OracleError> {
        self(body, instant, observer)
    }
}

/// Normalize an angle to [0, 360).
pub fn normalize_longitude(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Start of the UTC hour containing `instant`.
pub fn hour_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs = instant.timestamp().div_euclid(SECONDS_PER_HOUR) * SECONDS_PER_HOUR;
    DateTime::from_timestamp(secs, 0).unwrap_or(instant)
}

/// Oracle + cache + observer, bound for one generation run.
///
/// Every request is quantized to the start of its UTC hour before the
/// oracle is called, whether or not the cache is enabled, so cached and
/// uncached runs see identical longitudes.
#[derive(Clone, Copy)]
pub struct Ephemeris<'a> {
    oracle: &'a dyn PositionOracle,
    cache: &'a PositionCache,
    observer: Observer,
}

impl std::fmt::Debug for Ephemeris<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ephemeris")
            .field("observer", &self.observer)
            .field("cache_capacity", &self.cache.capacity())
            .finish()
    }
}

impl<'a> Ephemeris<'a> {
    pub fn new(
        oracle: &'a dyn PositionOracle,
        cache: &'a PositionCache,
        observer: Observer,
    ) -> Self {
        Self {
            oracle,
            cache,
            observer,
        }
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn cache(&self) -> &PositionCache {
        self.cache
    }

    /// Ecliptic longitude in [0, 360) at the start of the hour containing `instant`.
    ///
    /// A failing oracle call is not cached, so later lookups for the same
    /// or other keys retry normally.
    pub fn longitude(&self, body: Body, instant: DateTime<Utc>) -> Result<f64, CoreError> {
        let sample_at = hour_start(instant);
        let key = CacheKey::new(body, sample_at, &self.observer);
        self.cache.get_or_try_insert(key, || {
            let raw = self
                .oracle
                .ecliptic_longitude(body, sample_at, &self.observer)
                .map_err(|source| CoreError::Oracle {
                    body,
                    instant: sample_at,
                    source,
                })?;
            if !raw.is_finite() {
                return Err(CoreError::NonFiniteLongitude {
                    body,
                    instant: sample_at,
                });
            }
            Ok(normalize_longitude(raw))
        })
    }
}
