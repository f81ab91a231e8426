//! Detected events: one struct per kind, unified by the [`Event`] sum type.

use almanac_base::{AspectKind, MoonPhase, SeasonalKind, Sign, Significance};
use almanac_core::Body;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A body crossing into the next sign between two daily samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignIngressEvent {
    pub body: Body,
    /// Day of the earlier sample.
    pub date: NaiveDate,
    pub instant: DateTime<Utc>,
    pub from_sign: Sign,
    pub to_sign: Sign,
    pub significance: Significance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationAction {
    /// Stations retrograde.
    Begins,
    /// Stations direct.
    Ends,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationEvent {
    pub body: Body,
    pub date: NaiveDate,
    pub instant: DateTime<Utc>,
    pub action: StationAction,
    pub sign: Sign,
    pub significance: Significance,
}

/// An aspect as first seen at a sample. `approx_time` is the sample's time
/// of day, not the moment of exactness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectEvent {
    /// Earlier of the pair in canonical body order.
    pub body_a: Body,
    pub body_b: Body,
    pub aspect: AspectKind,
    pub date: NaiveDate,
    pub approx_time: NaiveTime,
    pub instant: DateTime<Utc>,
    /// Observed separation in [0, 180].
    pub separation_deg: f64,
    /// |separation - exact angle|.
    pub orb_deg: f64,
    pub significance: Significance,
}

impl AspectEvent {
    pub fn involves(&self, body: Body) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// True for the unordered pair {a, b}.
    pub fn is_pair(&self, a: Body, b: Body) -> bool {
        (self.body_a == a && self.body_b == b) || (self.body_a == b && self.body_b == a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonPhaseEvent {
    pub phase: MoonPhase,
    pub date: NaiveDate,
    pub instant: DateTime<Utc>,
    /// Sign of the Moon at the sample.
    pub sign: Sign,
    pub is_major: bool,
    pub phase_angle_deg: f64,
    /// Display label for full moons, e.g. "Harvest Moon".
    pub traditional_name: Option<String>,
    pub significance: Significance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalEvent {
    pub name: String,
    pub date: NaiveDate,
    pub instant: DateTime<Utc>,
    pub marker: SeasonalKind,
    pub significance: Significance,
}

/// Any detected event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    SignIngress(SignIngressEvent),
    RetrogradeStation(StationEvent),
    Aspect(AspectEvent),
    MoonPhase(MoonPhaseEvent),
    Seasonal(SeasonalEvent),
}

impl Event {
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            Self::SignIngress(e) => e.instant,
            Self::RetrogradeStation(e) => e.instant,
            Self::Aspect(e) => e.instant,
            Self::MoonPhase(e) => e.instant,
            Self::Seasonal(e) => e.instant,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::SignIngress(e) => e.date,
            Self::RetrogradeStation(e) => e.date,
            Self::Aspect(e) => e.date,
            Self::MoonPhase(e) => e.date,
            Self::Seasonal(e) => e.date,
        }
    }

    pub fn significance(&self) -> Significance {
        match self {
            Self::SignIngress(e) => e.significance,
            Self::RetrogradeStation(e) => e.significance,
            Self::Aspect(e) => e.significance,
            Self::MoonPhase(e) => e.significance,
            Self::Seasonal(e) => e.significance,
        }
    }

    /// Tie-break among equal significance; lower sorts first.
    pub const fn kind_priority(&self) -> u8 {
        match self {
            Self::RetrogradeStation(_) => 0,
            Self::SignIngress(_) => 1,
            Self::Aspect(_) => 2,
            Self::MoonPhase(_) => 3,
            Self::Seasonal(_) => 4,
        }
    }

    /// Short human-readable headline.
    pub fn title(&self) -> String {
        match self {
            Self::SignIngress(e) => format!("{} enters {}", e.body, e.to_sign),
            Self::RetrogradeStation(e) => match e.action {
                StationAction::Begins => format!("{} stations retrograde in {}", e.body, e.sign),
                StationAction::Ends => format!("{} stations direct in {}", e.body, e.sign),
            },
            Self::Aspect(e) => format!("{} {} {}", e.body_a, e.aspect, e.body_b),
            Self::MoonPhase(e) => match &e.traditional_name {
                Some(name) => format!("{} ({}) in {}", e.phase, name, e.sign),
                None => format!("{} in {}", e.phase, e.sign),
            },
            Self::Seasonal(e) => e.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn station() -> Event {
        let instant = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();
        Event::RetrogradeStation(StationEvent {
            body: Body::Mercury,
            date: instant.date_naive(),
            instant,
            action: StationAction::Begins,
            sign: Sign::Aries,
            significance: Significance::High,
        })
    }

    #[test]
    fn accessors() {
        let e = station();
        assert_eq!(e.kind_priority(), 0);
        assert_eq!(e.significance(), Significance::High);
        assert_eq!(e.date(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(e.title(), "Mercury stations retrograde in Aries");
    }

    #[test]
    fn serialized_with_kind_tag() {
        let json = serde_json::to_value(station()).unwrap();
        assert_eq!(json["kind"], "retrograde_station");
        assert_eq!(json["action"], "begins");
        assert_eq!(json["significance"], "high");
        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, station());
    }
}
