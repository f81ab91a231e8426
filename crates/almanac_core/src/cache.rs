//! Hour-quantized memoization of oracle longitudes.
//!
//! Keys are (body, UTC hour, observer). The cache is bounded; when full, the
//! single oldest-inserted key is evicted (FIFO, tracked with an explicit
//! insertion queue). A zero-capacity cache stores nothing and behaves as a
//! pass-through.
//!
//! The cache is `Send + Sync`. Lookups and inserts take a short lock; the
//! oracle itself is evaluated outside the lock, so two threads missing on the
//! same key may both compute it. Both produce the same value, and the second
//! insert is a no-op.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::Body;
use crate::observer::Observer;

const SECONDS_PER_HOUR: i64 = 3600;

/// Cache key: body, hours since the Unix epoch, observer bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    body: Body,
    hour: i64,
    observer: [u64; 3],
}

impl CacheKey {
    /// Build a key; `instant` is truncated to its UTC hour.
    pub fn new(body: Body, instant: DateTime<Utc>, observer: &Observer) -> Self {
        Self {
            body,
            hour: instant.timestamp().div_euclid(SECONDS_PER_HOUR),
            observer: observer.key_bits(),
        }
    }

    pub fn body(&self) -> Body {
        self.body
    }

    /// Hours since 1970-01-01T00:00:00Z.
    pub fn hour(&self) -> i64 {
        self.hour
    }
}

/// Counters since construction or the last [`PositionCache::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<CacheKey, f64>,
    order: VecDeque<CacheKey>,
    stats: CacheStats,
}

/// Bounded FIFO cache of normalized longitudes.
#[derive(Debug)]
pub struct PositionCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl PositionCache {
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
                order: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
                stats: CacheStats::default(),
            }),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Drop all entries and reset counters.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
        inner.stats = CacheStats::default();
    }

    /// Cached value for `key`, if present.
    pub fn get(&self, key: &CacheKey) -> Option<f64> {
        let mut inner = self.lock();
        match inner.entries.get(key).copied() {
            Some(v) => {
                inner.stats.hits += 1;
                Some(v)
            }
            None => {
                inner.stats.misses += 1;
                None
            }
        }
    }

    /// Insert a value, evicting the oldest key when full.
    pub fn insert(&self, key: CacheKey, value: f64) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.lock();
        if let Some(existing) = inner.entries.get_mut(&key) {
            // Lost a compute race; values for one key are equal.
            *existing = value;
            return;
        }
        while inner.entries.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            inner.stats.evictions += 1;
            debug!(body = %oldest.body, hour = oldest.hour, "position cache eviction");
        }
        inner.entries.insert(key, value);
        inner.order.push_back(key);
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// Errors from `compute` are returned as-is and nothing is stored.
    pub fn get_or_try_insert<E, F>(&self, key: CacheKey, compute: F) -> Result<f64, E>
    where
        F: FnOnce() -> Result<f64, E>,
    {
        if let Some(v) = self.get(&key) {
            return Ok(v);
        }
        let value = compute()?;
        self.insert(key, value);
        Ok(value)
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
