//! Best-day scoring.
//!
//! Each (category, day) accumulates independent contributions, each one a
//! [`Reason`] carrying its points, so a day's score is always the sum of its
//! listed reasons. A reason text already present for the day is not counted
//! again. Days scoring zero are dropped; the rest are ranked by score with
//! ties kept in date order, truncated, and assigned tiers.

use std::collections::BTreeMap;

use almanac_base::weekday_name;
use almanac_search::AspectEvent;
use chrono::Datelike;

use crate::forecast::DailyForecast;
use crate::scoring_types::{
    CategoryRanking, CategoryRules, CategoryWeightTable, RankedDay, Reason, ScoringCategory, Tier,
};

/// Score needed for the top-ranked day to be `best`.
const BEST_MIN_SCORE: u32 = 5;
/// Score needed for `good`.
const GOOD_MIN_SCORE: u32 = 4;

fn render(template: &str, a: &str, aspect: &str, b: &str) -> String {
    template
        .replace("{a}", a)
        .replace("{aspect}", aspect)
        .replace("{b}", b)
}

struct Tally {
    reasons: Vec<Reason>,
}

impl Tally {
    fn add(&mut self, text: String, points: u32) {
        if points == 0 || self.reasons.iter().any(|r| r.text == text) {
            return;
        }
        self.reasons.push(Reason { text, points });
    }
}

/// Aspect contribution: the patron rules first, then supportive pairs.
/// At most one rule fires per aspect.
fn aspect_reason(rules: &CategoryRules, aspect: &AspectEvent) -> Option<(String, u32)> {
    for rule in &rules.patron_aspects {
        if aspect.involves(rule.body) && rule.kinds.contains(&aspect.aspect) {
            let other = if aspect.body_a == rule.body {
                aspect.body_b
            } else {
                aspect.body_a
            };
            let text = render(&rule.reason, rule.body.name(), aspect.aspect.name(), other.name());
            return Some((text, rule.points));
        }
    }
    for rule in &rules.supportive_aspects {
        if aspect.is_pair(rule.a, rule.b) && rule.kinds.contains(&aspect.aspect) {
            let text = render(&rule.reason, rule.a.name(), aspect.aspect.name(), rule.b.name());
            return Some((text, rule.points));
        }
    }
    None
}

/// Reasons for one category on one day, in rule order.
pub fn score_day(rules: &CategoryRules, forecast: &DailyForecast) -> Vec<Reason> {
    let mut tally = Tally {
        reasons: Vec::new(),
    };

    for rule in &rules.rulers {
        if forecast.ruling_body == rule.body {
            tally.add(rule.reason.clone(), rule.points);
        }
    }
    if let Some(sign) = forecast.moon_sign {
        for rule in rules.moon_signs.iter().filter(|r| r.sign == sign) {
            tally.add(rule.reason.clone(), rule.points);
        }
    }
    for aspect in forecast.aspects() {
        if let Some((text, points)) = aspect_reason(rules, aspect) {
            tally.add(text, points);
        }
    }
    for phase in forecast.moon_phases() {
        for rule in rules.phase_rules.iter().filter(|r| r.phases.contains(&phase.phase)) {
            let text = rule.reason.replace("{phase}", phase.phase.name());
            tally.add(text, rule.points + rule.bonus);
        }
    }
    tally.reasons
}

fn tier_for(rank: usize, score: u32) -> Tier {
    if rank == 0 && score >= BEST_MIN_SCORE {
        Tier::Best
    } else if score >= GOOD_MIN_SCORE {
        Tier::Good
    } else {
        Tier::Favorable
    }
}

/// Top `top_days` scoring days for one category.
pub fn rank_category(
    rules: &CategoryRules,
    forecasts: &[DailyForecast],
    top_days: usize,
) -> Vec<RankedDay> {
    let mut scored: Vec<(u32, &DailyForecast, Vec<Reason>)> = forecasts
        .iter()
        .map(|f| {
            let reasons = score_day(rules, f);
            let score = reasons.iter().map(|r| r.points).sum();
            (score, f, reasons)
        })
        .filter(|(score, _, _)| *score > 0)
        .collect();
    // Stable: equal scores stay chronological.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(top_days);

    scored
        .into_iter()
        .enumerate()
        .map(|(rank, (score, f, reasons))| RankedDay {
            date: f.date,
            category: rules.category,
            score,
            reasons,
            tier: tier_for(rank, score),
        })
        .collect()
}

/// Summary naming the `Best` day and its largest contribution, or a count of
/// the ranked days when none reached `Best`.
pub fn summarize(category: ScoringCategory, ranked: &[RankedDay]) -> String {
    if ranked.is_empty() {
        return format!(
            "Look for {} opportunities throughout the week.",
            category.name()
        );
    }
    let Some(best) = ranked.iter().find(|d| d.tier == Tier::Best) else {
        return format!(
            "{} favorable days for {} this week.",
            ranked.len(),
            category.name()
        );
    };
    let mut best_reason: Option<&Reason> = None;
    for r in &best.reasons {
        if best_reason.is_none_or(|b| r.points > b.points) {
            best_reason = Some(r);
        }
    }
    let why = best_reason
        .map(|r| r.text.as_str())
        .unwrap_or("Favorable cosmic alignment");
    format!(
        "{} is your power day for {}. {}.",
        weekday_name(best.date.weekday()),
        category.name(),
        why
    )
}

/// Rankings for every category in the table.
pub fn score_categories(
    table: &CategoryWeightTable,
    forecasts: &[DailyForecast],
    top_days: usize,
) -> BTreeMap<ScoringCategory, CategoryRanking> {
    table
        .categories
        .iter()
        .map(|rules| {
            let ranked_days = rank_category(rules, forecasts, top_days);
            let summary = summarize(rules.category, &ranked_days);
            (
                rules.category,
                CategoryRanking {
                    ranked_days,
                    summary,
                },
            )
        })
        .collect()
}
