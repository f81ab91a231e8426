//! Angle arithmetic and apparent direction of motion.

use almanac_core::normalize_longitude;

/// Normalize an angle to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    normalize_longitude(deg)
}

/// Normalize an angle to (-180, 180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Shorter arc between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Whether a body moved backward between two samples one step apart.
///
/// A raw jump of 180 degrees or more means the pair straddles 0/360, and
/// the comparison inverts: 359 -> 1 is forward motion, 1 -> 359 is backward.
pub fn is_retrograde(lon_now: f64, lon_prev: f64) -> bool {
    if (lon_now - lon_prev).abs() < 180.0 {
        lon_now < lon_prev
    } else {
        lon_now > lon_prev
    }
}
