//! Geographic observer location.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Geographic location from which positions are computed.
///
/// Immutable for the duration of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Elevation above mean sea level in meters.
    pub elevation_m: f64,
}

impl Observer {
    /// Create a new observer.
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        }
    }

    /// Royal Observatory, Greenwich.
    pub fn greenwich() -> Self {
        Self::new(51.4769, 0.0005, 0.0)
    }

    /// Validate coordinate ranges.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(CoreError::InvalidObserver(
                "latitude_deg must be finite and within [-90, 90]",
            ));
        }
        if !self.longitude_deg.is_finite() || !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(CoreError::InvalidObserver(
                "longitude_deg must be finite and within [-180, 180]",
            ));
        }
        if !self.elevation_m.is_finite() {
            return Err(CoreError::InvalidObserver("elevation_m must be finite"));
        }
        Ok(())
    }

    /// Bit pattern used as part of a cache key.
    pub(crate) fn key_bits(&self) -> [u64; 3] {
        [
            self.latitude_deg.to_bits(),
            self.longitude_deg.to_bits(),
            self.elevation_m.to_bits(),
        ]
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::greenwich()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greenwich_is_valid() {
        assert!(Observer::greenwich().validate().is_ok());
    }

    #[test]
    fn rejects_latitude_out_of_range() {
        assert!(Observer::new(91.0, 0.0, 0.0).validate().is_err());
        assert!(Observer::new(-90.5, 0.0, 0.0).validate().is_err());
    }

    #[test]
    fn rejects_longitude_out_of_range() {
        assert!(Observer::new(0.0, 180.5, 0.0).validate().is_err());
    }

    #[test]
    fn rejects_nan() {
        assert!(Observer::new(f64::NAN, 0.0, 0.0).validate().is_err());
        assert!(Observer::new(0.0, 0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn poles_and_antimeridian_allowed() {
        assert!(Observer::new(90.0, -180.0, 8848.0).validate().is_ok());
        assert!(Observer::new(-90.0, 180.0, -400.0).validate().is_ok());
    }
}
