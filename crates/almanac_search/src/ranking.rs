//! Merge detector output into a significance-ordered highlight list.

use std::cmp::Reverse;

use almanac_base::Significance;
use chrono::{DateTime, Utc};

use crate::event::Event;

/// Sort key: significance descending, then kind priority (stations before
/// ingresses), then instant.
fn rank_key(e: &Event) -> (Reverse<Significance>, u8, DateTime<Utc>) {
    (Reverse(e.significance()), e.kind_priority(), e.instant())
}

/// Order events for display and drop exact duplicates.
///
/// The sort is stable, so equal keys keep their input order; given the same
/// input the output is identical run to run. Exact duplicates share a key,
/// so they are only looked for within the run of equal keys.
pub fn rank_events(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by_key(rank_key);
    let mut unique: Vec<Event> = Vec::with_capacity(events.len());
    let mut run_start = 0;
    for e in events {
        if unique.last().is_some_and(|last| rank_key(last) != rank_key(&e)) {
            run_start = unique.len();
        }
        if !unique[run_start..].contains(&e) {
            unique.push(e);
        }
    }
    unique
}
