//! Zodiac sign and DMS (degrees-minutes-seconds) classification.
//!
//! The ecliptic is divided into 12 equal signs of 30 degrees, starting with
//! Aries at 0 degrees. Every longitude in [0, 360) falls in exactly one sign.

use serde::{Deserialize, Serialize};

use crate::motion::normalize_360;

/// The 12 signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

/// Classical element of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Sign {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Aries => 0,
            Self::Taurus => 1,
            Self::Gemini => 2,
            Self::Cancer => 3,
            Self::Leo => 4,
            Self::Virgo => 5,
            Self::Libra => 6,
            Self::Scorpio => 7,
            Self::Sagittarius => 8,
            Self::Capricorn => 9,
            Self::Aquarius => 10,
            Self::Pisces => 11,
        }
    }

    /// Fire, earth, air, water repeating from Aries.
    pub const fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Longitude where this sign begins.
    pub fn start_deg(self) -> f64 {
        self.index() as f64 * 30.0
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Whole degrees (0..29 within a sign).
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds [0, 60), may include a fractional part.
    pub seconds: f64,
}

/// Full sign position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignInfo {
    pub sign: Sign,
    /// Decimal degrees within the sign [0, 30).
    pub degrees_in_sign: f64,
    pub dms: Dms,
}

/// Convert decimal degrees to degrees-minutes-seconds. Sign of input is ignored.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor();
    let minutes_f = (d - degrees) * 60.0;
    let minutes = minutes_f.floor();
    Dms {
        degrees: degrees as u16,
        minutes: minutes as u8,
        seconds: (minutes_f - minutes) * 60.0,
    }
}

/// Sign index `floor(lon / 30)` after normalization.
pub fn sign_index(longitude_deg: f64) -> u8 {
    let lon = normalize_360(longitude_deg);
    // Division can round up across a boundary (and to 12 just below 360).
    let idx = ((lon / 30.0).floor() as u8).min(11);
    if idx > 0 && lon < idx as f64 * 30.0 {
        idx - 1
    } else {
        idx
    }
}

/// Sign containing an ecliptic longitude.
pub fn sign_of(longitude_deg: f64) -> Sign {
    ALL_SIGNS[sign_index(longitude_deg) as usize]
}

/// Sign plus position within it.
pub fn sign_from_longitude(longitude_deg: f64) -> SignInfo {
    let lon = normalize_360(longitude_deg);
    let sign = sign_of(lon);
    let degrees_in_sign = lon - sign.start_deg();
    SignInfo {
        sign,
        degrees_in_sign,
        dms: deg_to_dms(degrees_in_sign),
    }
}
