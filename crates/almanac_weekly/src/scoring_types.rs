//! Types for best-day scoring: categories, rule tables and ranked output.

use almanac_base::{AspectKind, MoonPhase, Sign};
use almanac_core::Body;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringCategory {
    Love,
    Prosperity,
    Healing,
    Protection,
    Manifestation,
    Cleansing,
}

impl ScoringCategory {
    pub const ALL: [ScoringCategory; 6] = [
        ScoringCategory::Love,
        ScoringCategory::Prosperity,
        ScoringCategory::Healing,
        ScoringCategory::Protection,
        ScoringCategory::Manifestation,
        ScoringCategory::Cleansing,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Prosperity => "prosperity",
            Self::Healing => "healing",
            Self::Protection => "protection",
            Self::Manifestation => "manifestation",
            Self::Cleansing => "cleansing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Best,
    Good,
    Favorable,
}

/// One scored contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub text: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedDay {
    pub date: NaiveDate,
    pub category: ScoringCategory,
    /// Sum of `reasons[..].points`.
    pub score: u32,
    pub reasons: Vec<Reason>,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRanking {
    pub ranked_days: Vec<RankedDay>,
    pub summary: String,
}

/// Points when the day's ruling body matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulerRule {
    pub body: Body,
    pub points: u32,
    pub reason: String,
}

/// Points when the Moon is in a sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonSignRule {
    pub sign: Sign,
    pub points: u32,
    pub reason: String,
}

/// Points for an aspect of `body` to any other body.
///
/// `reason` may use `{a}` (this body), `{aspect}` and `{b}` (the other body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronAspectRule {
    pub body: Body,
    pub kinds: Vec<AspectKind>,
    pub points: u32,
    pub reason: String,
}

/// Points for an aspect between one specific pair, in either order.
/// Placeholders as for [`PatronAspectRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairAspectRule {
    pub a: Body,
    pub b: Body,
    pub kinds: Vec<AspectKind>,
    pub points: u32,
    pub reason: String,
}

/// Points for a principal phase falling on the day.
///
/// `bonus` is added on top of `points` in the same reason. `reason` may use
/// `{phase}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRule {
    pub phases: Vec<MoonPhase>,
    pub points: u32,
    #[serde(default)]
    pub bonus: u32,
    pub reason: String,
}

/// All rules for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    pub category: ScoringCategory,
    #[serde(default)]
    pub rulers: Vec<RulerRule>,
    #[serde(default)]
    pub moon_signs: Vec<MoonSignRule>,
    #[serde(default)]
    pub patron_aspects: Vec<PatronAspectRule>,
    #[serde(default)]
    pub supportive_aspects: Vec<PairAspectRule>,
    #[serde(default)]
    pub phase_rules: Vec<PhaseRule>,
}

impl CategoryRules {
    fn new(category: ScoringCategory) -> Self {
        Self {
            category,
            rulers: Vec::new(),
            moon_signs: Vec::new(),
            patron_aspects: Vec::new(),
            supportive_aspects: Vec::new(),
            phase_rules: Vec::new(),
        }
    }

    fn ruler(mut self, body: Body, points: u32, reason: &str) -> Self {
        self.rulers.push(RulerRule {
            body,
            points,
            reason: reason.to_string(),
        });
        self
    }

    fn moon_sign(mut self, sign: Sign, reason: &str) -> Self {
        self.moon_signs.push(MoonSignRule {
            sign,
            points: MOON_SIGN_POINTS,
            reason: reason.to_string(),
        });
        self
    }

    fn patron(mut self, body: Body, reason: &str) -> Self {
        self.patron_aspects.push(PatronAspectRule {
            body,
            kinds: vec![AspectKind::Conjunction, AspectKind::Sextile, AspectKind::Trine],
            points: HARMONIOUS_ASPECT_POINTS,
            reason: reason.to_string(),
        });
        self
    }

    fn supportive(mut self, pair: (Body, Body), kinds: &[AspectKind], reason: &str) -> Self {
        self.supportive_aspects.push(PairAspectRule {
            a: pair.0,
            b: pair.1,
            kinds: kinds.to_vec(),
            points: SUPPORTIVE_ASPECT_POINTS,
            reason: reason.to_string(),
        });
        self
    }

    fn phase(mut self, phases: &[MoonPhase], bonus: u32, reason: &str) -> Self {
        self.phase_rules.push(PhaseRule {
            phases: phases.to_vec(),
            points: MOON_PHASE_POINTS,
            bonus,
            reason: reason.to_string(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rulers.is_empty()
            && self.moon_signs.is_empty()
            && self.patron_aspects.is_empty()
            && self.supportive_aspects.is_empty()
            && self.phase_rules.is_empty()
    }
}

pub const RULER_POINTS: u32 = 3;
pub const MOON_SIGN_POINTS: u32 = 2;
pub const HARMONIOUS_ASPECT_POINTS: u32 = 4;
pub const SUPPORTIVE_ASPECT_POINTS: u32 = 2;
pub const MOON_PHASE_POINTS: u32 = 3;

/// Rule tables for every scored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeightTable {
    pub categories: Vec<CategoryRules>,
}

impl CategoryWeightTable {
    pub fn rules(&self, category: ScoringCategory) -> Option<&CategoryRules> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.categories.is_empty() {
            return Err("scoring table must list at least one category");
        }
        for (i, c) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|o| o.category == c.category) {
                return Err("scoring categories must be unique");
            }
            if c.is_empty() {
                return Err("every scoring category needs at least one rule");
            }
            let aspect_kinds_missing = c.patron_aspects.iter().any(|r| r.kinds.is_empty())
                || c.supportive_aspects.iter().any(|r| r.kinds.is_empty());
            if aspect_kinds_missing {
                return Err("aspect rules must list at least one aspect kind");
            }
            if c.phase_rules.iter().any(|r| r.phases.is_empty()) {
                return Err("phase rules must list at least one phase");
            }
        }
        Ok(())
    }
}

impl Default for CategoryWeightTable {
    fn default() -> Self {
        use ScoringCategory::*;
        let love = CategoryRules::new(Love)
            .ruler(Body::Venus, RULER_POINTS, "Venus rules this day - peak romantic energy")
            .moon_sign(Sign::Libra, "Moon in Libra favors partnership and harmony")
            .moon_sign(Sign::Taurus, "Moon in Taurus enhances sensuality and connection")
            .patron(Body::Venus, "{a} {aspect} {b} brings romantic flow")
            .supportive(
                (Body::Venus, Body::Mars),
                &[AspectKind::Square, AspectKind::Opposition],
                "{a} {aspect} {b} stirs passion",
            );

        let prosperity = CategoryRules::new(Prosperity)
            .ruler(Body::Jupiter, RULER_POINTS, "Jupiter rules this day - expansion and luck")
            .moon_sign(Sign::Sagittarius, "Moon in Sagittarius amplifies opportunity")
            .moon_sign(Sign::Taurus, "Moon in Taurus grounds financial matters")
            .patron(Body::Jupiter, "{a} {aspect} {b} opens doors to abundance");

        let healing = CategoryRules::new(Healing)
            .ruler(Body::Moon, RULER_POINTS, "Moon rules this day - emotional healing supported")
            .moon_sign(Sign::Cancer, "Moon in Cancer nurtures inner healing")
            .moon_sign(Sign::Pisces, "Moon in Pisces opens spiritual healing")
            .patron(Body::Moon, "{a} {aspect} {b} soothes body and spirit")
            .phase(
                &[
                    MoonPhase::NewMoon,
                    MoonPhase::FirstQuarter,
                    MoonPhase::FullMoon,
                    MoonPhase::LastQuarter,
                ],
                0,
                "{phase} amplifies healing rituals",
            );

        let protection = CategoryRules::new(Protection)
            .ruler(Body::Mars, RULER_POINTS, "Mars rules this day - defensive strength peaks")
            .ruler(Body::Saturn, 2, "Saturn's energy builds lasting protection")
            .moon_sign(Sign::Aries, "Moon in Aries empowers boundaries")
            .moon_sign(Sign::Scorpio, "Moon in Scorpio strengthens psychic shields")
            .patron(Body::Mars, "{a} {aspect} {b} fortifies your defenses");

        let manifestation = CategoryRules::new(Manifestation)
            .ruler(Body::Sun, RULER_POINTS, "Sun rules this day - willpower magnified")
            .moon_sign(Sign::Aries, "Moon in Aries initiates powerful beginnings")
            .moon_sign(Sign::Leo, "Moon in Leo amplifies creative vision")
            .patron(Body::Sun, "{a} {aspect} {b} lights up your intentions")
            .phase(
                &[MoonPhase::NewMoon],
                2,
                "New Moon is the ultimate time for new intentions",
            );

        let cleansing = CategoryRules::new(Cleansing)
            .ruler(
                Body::Saturn,
                RULER_POINTS,
                "Saturn rules this day - release what no longer serves",
            )
            .moon_sign(Sign::Scorpio, "Moon in Scorpio transforms and purges")
            .patron(Body::Saturn, "{a} {aspect} {b} clears away the old")
            .phase(&[MoonPhase::FullMoon], 0, "Full Moon illuminates what needs releasing")
            .phase(
                &[MoonPhase::LastQuarter],
                0,
                "Waning Moon naturally supports letting go",
            );

        Self {
            categories: vec![love, prosperity, healing, protection, manifestation, cleansing],
        }
    }
}
