//! Per-instant body positions with derived sign and direction.

use almanac_core::{Body, CoreError, Ephemeris};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::motion::is_retrograde;
use crate::sign::{Dms, Sign, deg_to_dms, sign_of};

/// One body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Ecliptic longitude in [0, 360).
    pub longitude_deg: f64,
    pub sign: Sign,
    /// Moved backward over the preceding 24 hours.
    pub retrograde: bool,
}

impl BodyPosition {
    /// Classify from the current longitude and the one 24 hours earlier.
    pub fn from_samples(body: Body, lon_now: f64, lon_prev: f64) -> Self {
        Self {
            body,
            longitude_deg: lon_now,
            sign: sign_of(lon_now),
            retrograde: is_retrograde(lon_now, lon_prev),
        }
    }

    /// Sample one body at `instant` and 24 hours earlier.
    pub fn sample(
        ephemeris: &Ephemeris<'_>,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let now = ephemeris.longitude(body, instant)?;
        let earlier = instant
            .checked_sub_signed(Duration::days(1))
            .ok_or(CoreError::InstantOutOfRange { instant })?;
        let before = ephemeris.longitude(body, earlier)?;
        Ok(Self::from_samples(body, now, before))
    }

    /// Degrees into the current sign [0, 30).
    pub fn degree_in_sign(&self) -> f64 {
        self.longitude_deg - self.sign.start_deg()
    }

    pub fn dms(&self) -> Dms {
        deg_to_dms(self.degree_in_sign())
    }
}

/// All requested bodies at one instant. Positions are kept in the order the
/// bodies were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSnapshot {
    pub instant: DateTime<Utc>,
    pub positions: Vec<BodyPosition>,
}

impl EphemerisSnapshot {
    /// Sample every body at `instant` and 24 hours earlier.
    ///
    /// Fails with the first sampling error; other instants are unaffected.
    pub fn capture(
        ephemeris: &Ephemeris<'_>,
        instant: DateTime<Utc>,
        bodies: &[Body],
    ) -> Result<Self, CoreError> {
        let positions = bodies
            .iter()
            .map(|&body| BodyPosition::sample(ephemeris, body, instant))
            .collect::<Result<Vec<_>, CoreError>>()?;
        Ok(Self { instant, positions })
    }

    pub fn get(&self, body: Body) -> Option<&BodyPosition> {
        self.positions.iter().find(|p| p.body == body)
    }

    pub fn sign_of(&self, body: Body) -> Option<Sign> {
        self.get(body).map(|p| p.sign)
    }

    /// Retrograde bodies, Sun and Moon excluded.
    pub fn retrograde_bodies(&self) -> Vec<Body> {
        self.positions
            .iter()
            .filter(|p| p.retrograde && !p.body.is_luminary())
            .map(|p| p.body)
            .collect()
    }
}
