//! Best-day scoring scenarios over hand-built forecasts, plus the
//! score-equals-reasons property.

use almanac_base::{
    ALL_SIGNS, AspectKind, MoonPhase, Sign, Significance, day_ruler, weekday_name,
};
use almanac_core::Body;
use almanac_search::{AspectEvent, Event, MoonPhaseEvent, day_start};
use almanac_weekly::{
    CategoryWeightTable, DailyForecast, ScoringCategory, Tier, rank_category,
    score_categories, score_day,
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use proptest::prelude::*;

/// 2025-08-04 is a Monday.
fn date(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 4).unwrap() + chrono::Duration::days(i64::from(offset))
}

fn forecast(offset: u32, moon_sign: Option<Sign>, events: Vec<Event>) -> DailyForecast {
    let d = date(offset);
    DailyForecast {
        date: d,
        weekday: weekday_name(d.weekday()).to_string(),
        ruling_body: day_ruler(d.weekday()),
        moon_sign,
        events,
        retrograde_bodies: Vec::new(),
    }
}

fn aspect(offset: u32, a: Body, b: Body, kind: AspectKind) -> Event {
    let d = date(offset);
    Event::Aspect(AspectEvent {
        body_a: a.min(b),
        body_b: a.max(b),
        aspect: kind,
        date: d,
        approx_time: NaiveTime::MIN,
        instant: day_start(d),
        separation_deg: kind.exact_angle(),
        orb_deg: 0.0,
        significance: Significance::High,
    })
}

fn phase(offset: u32, p: MoonPhase) -> Event {
    let d = date(offset);
    Event::MoonPhase(MoonPhaseEvent {
        phase: p,
        date: d,
        instant: day_start(d),
        sign: Sign::Aries,
        is_major: p.is_major(),
        phase_angle_deg: p.centre_deg().unwrap_or(0.0),
        traditional_name: None,
        significance: Significance::High,
    })
}

fn rules(category: ScoringCategory) -> almanac_weekly::CategoryRules {
    CategoryWeightTable::default()
        .rules(category)
        .cloned()
        .unwrap()
}

#[test]
fn friday_venus_trine_mars_in_libra_scores_nine() {
    // Friday 2025-08-08
    let f = forecast(
        4,
        Some(Sign::Libra),
        vec![aspect(4, Body::Venus, Body::Mars, AspectKind::Trine)],
    );
    assert_eq!(f.ruling_body, Body::Venus);

    let ranked = rank_category(&rules(ScoringCategory::Love), &[f], 5);
    assert_eq!(ranked.len(), 1);
    let day = &ranked[0];
    assert_eq!(day.score, 9);
    assert_eq!(day.tier, Tier::Best);
    let points: Vec<u32> = day.reasons.iter().map(|r| r.points).collect();
    assert_eq!(points, vec![3, 2, 4]);
    assert_eq!(day.reasons[2].text, "Venus trine Mars brings romantic flow");
}

#[test]
fn challenging_venus_mars_is_supportive_only() {
    let f = forecast(
        0,
        None,
        vec![aspect(0, Body::Mars, Body::Venus, AspectKind::Square)],
    );
    let reasons = score_day(&rules(ScoringCategory::Love), &f);
    assert_eq!(reasons.len(), 1);
    assert_eq!(reasons[0].points, 2);
    assert_eq!(reasons[0].text, "Venus square Mars stirs passion");
}

#[test]
fn unrelated_square_scores_nothing() {
    // Monday: Moon rules, which Love ignores.
    let f = forecast(
        0,
        Some(Sign::Gemini),
        vec![aspect(0, Body::Jupiter, Body::Saturn, AspectKind::Square)],
    );
    assert!(score_day(&rules(ScoringCategory::Love), &f).is_empty());
}

#[test]
fn new_moon_carries_manifestation_bonus() {
    let f = forecast(0, None, vec![phase(0, MoonPhase::NewMoon)]);
    let reasons = score_day(&rules(ScoringCategory::Manifestation), &f);
    assert_eq!(reasons.len(), 1);
    assert_eq!(reasons[0].points, 5);
}

#[test]
fn healing_names_the_phase() {
    let f = forecast(2, None, vec![phase(2, MoonPhase::FirstQuarter)]);
    let reasons = score_day(&rules(ScoringCategory::Healing), &f);
    assert_eq!(reasons[0].text, "First Quarter amplifies healing rituals");
    assert_eq!(reasons[0].points, 3);
}

#[test]
fn ties_keep_date_order_and_tiers_follow_rank() {
    // Two Thursdays (Jupiter) with Moon in Sagittarius, one later Thursday
    // with no moon bonus, and a Monday that scores nothing.
    let fs = vec![
        forecast(0, Some(Sign::Aries), Vec::new()),
        forecast(3, Some(Sign::Sagittarius), Vec::new()),
        forecast(10, Some(Sign::Sagittarius), Vec::new()),
        forecast(17, Some(Sign::Cancer), Vec::new()),
    ];
    let ranked = rank_category(&rules(ScoringCategory::Prosperity), &fs, 5);
    let dates: Vec<NaiveDate> = ranked.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date(3), date(10), date(17)]);
    assert_eq!(ranked[0].score, 5);
    assert_eq!(ranked[0].tier, Tier::Best);
    assert_eq!(ranked[1].tier, Tier::Good);
    assert_eq!(ranked[2].score, 3);
    assert_eq!(ranked[2].tier, Tier::Favorable);
}

#[test]
fn top_days_truncates() {
    let fs: Vec<_> = (0..14).map(|i| forecast(i, Some(Sign::Scorpio), Vec::new())).collect();
    let ranked = rank_category(&rules(ScoringCategory::Protection), &fs, 3);
    assert_eq!(ranked.len(), 3);
    // Tuesdays (Mars, 3) beat Saturdays (Saturn, 2); both get Scorpio.
    assert!(ranked.iter().take(2).all(|d| d.score == 5));
}

#[test]
fn summary_names_day_and_top_reason() {
    let f = forecast(
        4,
        Some(Sign::Libra),
        vec![aspect(4, Body::Venus, Body::Mars, AspectKind::Trine)],
    );
    let rankings = score_categories(&CategoryWeightTable::default(), &[f], 5);
    assert_eq!(rankings.len(), 6);
    assert_eq!(
        rankings[&ScoringCategory::Love].summary,
        "Friday is your power day for love. Venus trine Mars brings romantic flow."
    );
    assert_eq!(
        rankings[&ScoringCategory::Cleansing].summary,
        "Look for cleansing opportunities throughout the week."
    );
}

#[test]
fn weak_week_summary_counts_days() {
    // Monday: Moon rules, so prosperity only gets the Taurus moon.
    let f = forecast(0, Some(Sign::Taurus), Vec::new());
    let rankings = score_categories(&CategoryWeightTable::default(), &[f], 5);
    let prosperity = &rankings[&ScoringCategory::Prosperity];
    assert_eq!(prosperity.ranked_days.len(), 1);
    assert_eq!(prosperity.ranked_days[0].score, 2);
    assert_eq!(prosperity.ranked_days[0].tier, Tier::Favorable);
    assert_eq!(
        prosperity.summary,
        "1 favorable days for prosperity this week."
    );
}

fn any_event(offset: u32) -> impl Strategy<Value = Event> {
    prop_oneof![
        (0usize..10, 0usize..10, 0usize..5).prop_filter_map("distinct bodies", move |(a, b, k)| {
            (a != b).then(|| aspect(offset, Body::ALL[a], Body::ALL[b], AspectKind::ALL[k]))
        }),
        (0usize..8).prop_map(move |p| phase(offset, MoonPhase::ALL[p])),
    ]
}

fn any_forecast() -> impl Strategy<Value = DailyForecast> {
    (0u32..28, proptest::option::of(0usize..12)).prop_flat_map(|(offset, sign)| {
        proptest::collection::vec(any_event(offset), 0..8)
            .prop_map(move |events| forecast(offset, sign.map(|i| ALL_SIGNS[i]), events))
    })
}

proptest! {
    #[test]
    fn score_is_sum_of_distinct_reasons(fs in proptest::collection::vec(any_forecast(), 1..10)) {
        let table = CategoryWeightTable::default();
        for (category, ranking) in score_categories(&table, &fs, 5) {
            prop_assert!(ranking.ranked_days.len() <= 5);
            for pair in ranking.ranked_days.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
            for day in &ranking.ranked_days {
                prop_assert_eq!(day.category, category);
                prop_assert!(day.score > 0);
                let sum: u32 = day.reasons.iter().map(|r| r.points).sum();
                prop_assert_eq!(day.score, sum);
                for (i, r) in day.reasons.iter().enumerate() {
                    prop_assert!(day.reasons[..i].iter().all(|o| o.text != r.text));
                }
            }
        }
    }
}
