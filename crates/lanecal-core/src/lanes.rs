//! Lane assignment.
//!
//! Events that share a calendar day stack vertically; the lane is the row an
//! event occupies in every day cell it touches. Assignment is the classic
//! greedy sweep over an interval graph: partition events into connected
//! overlap groups, then within each group hand out the lowest free lane in
//! sorted order. Collision is day-granular throughout — an event owns its
//! lane for every day it touches, so each (date, lane) cell holds at most
//! one event and multi-day bars never jitter between days. The result is a
//! pure function of the event set: unchanged input yields unchanged lanes.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::interval::EventSpan;
use crate::types::EventId;

/// Assigns a lane to every candidate event.
///
/// Events are treated as intervals over calendar days, not time-of-day: two
/// events collide iff their touched day ranges intersect, directly or
/// through intermediate events (connected components of the interval
/// graph). A lane frees only once its occupant's last day has passed, so
/// same-day events always get distinct lanes even when their times do not
/// overlap.
///
/// Within a group, events are processed by first day ascending, ties broken
/// by longer day span first, then by effective start instant (all-day
/// events start at local midnight and so precede timed events on the same
/// date), then by id — the id comparison is a deterministic final tie-break
/// and carries no visual meaning. Lane count per group equals the maximum
/// number of events sharing any single day.
pub fn assign_lanes(candidates: &[(EventId, EventSpan)]) -> HashMap<EventId, u32> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| candidates[i].1.first_day);

    let mut lanes = HashMap::with_capacity(candidates.len());

    let mut group: Vec<usize> = Vec::new();
    let mut group_last_day = None;
    for i in order {
        let span = &candidates[i].1;
        match group_last_day {
            Some(last) if span.first_day > last => {
                assign_group(candidates, &mut group, &mut lanes);
                group.clear();
                group_last_day = Some(span.last_day);
            }
            Some(last) => group_last_day = Some(span.last_day.max(last)),
            None => group_last_day = Some(span.last_day),
        }
        group.push(i);
    }
    assign_group(candidates, &mut group, &mut lanes);

    lanes
}

/// Greedy sweep over one connected overlap group.
fn assign_group(
    candidates: &[(EventId, EventSpan)],
    group: &mut [usize],
    lanes: &mut HashMap<EventId, u32>,
) {
    group.sort_by(|&a, &b| {
        let (id_a, span_a) = &candidates[a];
        let (id_b, span_b) = &candidates[b];
        span_a
            .first_day
            .cmp(&span_b.first_day)
            .then_with(|| span_b.total_days().cmp(&span_a.total_days()))
            .then_with(|| span_a.start_utc.cmp(&span_b.start_utc))
            .then_with(|| id_a.cmp(id_b))
    });

    // One entry per lane: the last touched day of its current occupant
    let mut lane_last_days: Vec<NaiveDate> = Vec::new();
    for &i in group.iter() {
        let (id, span) = &candidates[i];
        let lane = lane_last_days
            .iter()
            .position(|&last| last < span.first_day)
            .unwrap_or(lane_last_days.len());
        if lane == lane_last_days.len() {
            lane_last_days.push(span.last_day);
        } else {
            lane_last_days[lane] = span.last_day;
        }
        lanes.insert(id.clone(), u32::try_from(lane).unwrap_or(u32::MAX));
    }
}
