//! Position sampling for the almanac engine.
//!
//! This crate provides:
//! - The fixed body enumeration and observer location
//! - The [`PositionOracle`] contract for a supplied ephemeris function
//! - An hour-quantized FIFO [`PositionCache`]
//! - [`Ephemeris`], which binds oracle, cache and observer for one run
//!
//! Nothing here knows about signs, aspects or events; those live in the
//! downstream crates.

pub mod body;
pub mod cache;
pub mod error;
pub mod observer;
pub mod oracle;

pub use body::Body;
pub use cache::{CacheKey, CacheStats, PositionCache};
pub use error::{CoreError, OracleError};
pub use observer::Observer;
pub use oracle::{Ephemeris, PositionOracle, hour_start, normalize_longitude};
