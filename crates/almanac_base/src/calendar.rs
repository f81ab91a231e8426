//! Weekday rulers and seasonal marker kinds.

use almanac_core::Body;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Traditional ruling body of a weekday (Sunday Sun .. Saturday Saturn).
pub const fn day_ruler(weekday: Weekday) -> Body {
    match weekday {
        Weekday::Sun => Body::Sun,
        Weekday::Mon => Body::Moon,
        Weekday::Tue => Body::Mars,
        Weekday::Wed => Body::Mercury,
        Weekday::Thu => Body::Jupiter,
        Weekday::Fri => Body::Venus,
        Weekday::Sat => Body::Saturn,
    }
}

/// English weekday name.
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Kind of fixed seasonal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeasonalKind {
    Equinox,
    Solstice,
    CrossQuarter,
}

impl SeasonalKind {
    /// Equinox or solstice.
    pub const fn is_solar(self) -> bool {
        matches!(self, Self::Equinox | Self::Solstice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rulers_cover_classical_bodies() {
        let days = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        let mut rulers: Vec<Body> = days.iter().map(|d| day_ruler(*d)).collect();
        rulers.sort();
        assert_eq!(rulers, Body::CLASSICAL.to_vec());
    }

    #[test]
    fn friday_is_venus() {
        assert_eq!(day_ruler(Weekday::Fri), Body::Venus);
        assert_eq!(weekday_name(Weekday::Fri), "Friday");
    }

    #[test]
    fn solar_kinds() {
        assert!(SeasonalKind::Equinox.is_solar());
        assert!(!SeasonalKind::CrossQuarter.is_solar());
    }
}
