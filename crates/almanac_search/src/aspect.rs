//! Aspect detection over fixed-step samples.
//!
//! At each sample every unordered pair of candidate bodies is checked
//! against the aspect table. A (pair, kind) seen again within the dedup
//! window of its last emission is suppressed, so a slow aspect that stays
//! in orb all week yields one event per day at most.

use std::collections::{BTreeSet, HashMap};

use almanac_base::{AspectKind, SignificanceTables, angular_separation};
use almanac_core::{Body, Ephemeris};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument};

use crate::aspect_types::{AspectSearchConfig, AspectTable};
use crate::diagnostics::{Detector, Diagnostics};
use crate::error::SearchError;
use crate::event::AspectEvent;
use crate::window::SearchWindow;

/// Unordered pairs in canonical body order, duplicates removed.
pub fn body_pairs(bodies: &[Body]) -> Vec<(Body, Body)> {
    let mut sorted = bodies.to_vec();
    sorted.sort();
    sorted.dedup();
    let mut pairs = Vec::new();
    for (i, &a) in sorted.iter().enumerate() {
        for &b in &sorted[i + 1..] {
            pairs.push((a, b));
        }
    }
    pairs
}

/// Aspects among `bodies` within the window, in sample order.
#[instrument(skip_all, fields(bodies = bodies.len(), step_hours = config.step_hours))]
pub fn search_aspects(
    eph: &Ephemeris<'_>,
    window: &SearchWindow,
    bodies: &[Body],
    table: &AspectTable,
    config: &AspectSearchConfig,
    tables: &SignificanceTables,
    diag: &mut Diagnostics,
) -> Result<Vec<AspectEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    table.validate().map_err(SearchError::InvalidConfig)?;

    let pairs = body_pairs(bodies);
    let dedup = Duration::hours(i64::from(config.dedup_hours));
    let mut last_emitted: HashMap<(Body, Body, AspectKind), DateTime<Utc>> = HashMap::new();
    let mut events = Vec::new();

    if pairs.is_empty() {
        return Ok(events);
    }
    let sampled: BTreeSet<Body> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();

    for t in window.samples(config.step_hours) {
        let longitudes: HashMap<Body, f64> = sampled
            .iter()
            .filter_map(|&body| {
                diag.observe(Detector::Aspect, t, eph.longitude(body, t))
                    .map(|lon| (body, lon))
            })
            .collect();

        for &(a, b) in &pairs {
            let (Some(&lon_a), Some(&lon_b)) = (longitudes.get(&a), longitudes.get(&b)) else {
                continue;
            };
            let sep = angular_separation(lon_a, lon_b);
            let Some((def, dev)) = table.find(sep) else {
                continue;
            };
            let key = (a, b, def.kind);
            if let Some(prev) = last_emitted.get(&key) {
                if t - *prev <= dedup {
                    continue;
                }
            }
            last_emitted.insert(key, t);
            events.push(AspectEvent {
                body_a: a,
                body_b: b,
                aspect: def.kind,
                date: t.date_naive(),
                approx_time: t.time(),
                instant: t,
                separation_deg: sep,
                orb_deg: dev,
                significance: tables.aspect(a, b, def.kind),
            });
        }
    }

    debug!(count = events.len(), "aspects");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_canonical_and_unique() {
        let p = body_pairs(&[Body::Mars, Body::Sun, Body::Mars, Body::Venus]);
        assert_eq!(
            p,
            vec![
                (Body::Sun, Body::Venus),
                (Body::Sun, Body::Mars),
                (Body::Venus, Body::Mars)
            ]
        );
    }

    #[test]
    fn seven_bodies_give_21_pairs() {
        assert_eq!(body_pairs(&Body::CLASSICAL).len(), 21);
    }

    #[test]
    fn single_body_has_no_pairs() {
        assert!(body_pairs(&[Body::Moon]).is_empty());
    }
}
