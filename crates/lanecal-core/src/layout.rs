//! The layout pass: bucketize lane-assigned events into per-day render lists.
//!
//! `layout_calendar` is the engine's single entry point. It is a pure
//! function of the event collection and the visible range: no state survives
//! a call, and unchanged input produces structurally equal output, so
//! callers may recompute on every input change or memoize as they see fit.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::Serialize;
use thiserror::Error;

use crate::event::CalendarEvent;
use crate::interval::EventSpan;
use crate::lanes::assign_lanes;
use crate::month::week_column;
use crate::types::EventId;

/// Configuration for a layout pass.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// First day of a week row. Bars break at row boundaries.
    /// Default: Sunday.
    pub week_start: Weekday,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
        }
    }
}

/// One event's visual footprint on one visible date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOccurrence {
    /// Lookup key back into the owning event collection.
    pub event_id: EventId,

    /// The date this occurrence sits on.
    pub date: NaiveDate,

    /// Vertical row within the day cell; lane 0 renders topmost.
    pub lane: u32,

    /// Visible days the event touches, identical on every occurrence of the
    /// same event.
    pub span_days: u32,

    /// True only on the first touched visible date.
    pub is_first_day: bool,

    /// True only on the last touched visible date.
    pub is_last_day: bool,

    /// Bar start offset within this day cell, in day-cell units. Currently
    /// always `0.0`; reserved for sub-day positioning of timed chips.
    pub offset_fraction: f32,

    /// Bar width in day-cell units, clamped to the days remaining in this
    /// week row. `0.0` on cells already covered by a bar started earlier in
    /// the same row.
    pub width_fraction: f32,
}

impl DayOccurrence {
    /// Whether a renderer should draw a bar anchored at this cell.
    pub fn starts_bar(&self) -> bool {
        self.width_fraction > 0.0
    }
}

/// Per-event problems found during a layout pass.
///
/// These are reported alongside the best-effort layout; a single malformed
/// event never blanks the calendar.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum LayoutWarning {
    /// `start >= end`; the event was excluded from the pass.
    #[error("event {id} has an empty or inverted interval")]
    InvalidInterval { id: EventId },

    /// The event's `tz` did not resolve; its stored offset was used instead.
    #[error("event {id} carries unknown timezone {tz:?}")]
    UnknownTimezone { id: EventId, tz: String },
}

/// Structural errors that fail the whole call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The caller passed an inverted visible range.
    #[error("visible range is inverted: {start} > {end}")]
    InvalidVisibleRange { start: NaiveDate, end: NaiveDate },
}

/// The result of a layout pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    /// Per-date occurrences, sorted by lane ascending. Dates with no events
    /// are absent.
    pub days: BTreeMap<NaiveDate, Vec<DayOccurrence>>,

    /// The lane assigned to every retained event.
    pub lanes: HashMap<EventId, u32>,

    /// Per-event problems encountered, in input order.
    pub warnings: Vec<LayoutWarning>,
}

/// Lays out `events` over the inclusive visible date range.
///
/// Events with invalid intervals are excluded and reported via
/// [`Layout::warnings`]; events entirely outside the range are silently
/// dropped. An inverted range is a programmer error and fails the call.
pub fn layout_calendar(
    events: &[CalendarEvent],
    visible_start: NaiveDate,
    visible_end: NaiveDate,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    if visible_start > visible_end {
        return Err(LayoutError::InvalidVisibleRange {
            start: visible_start,
            end: visible_end,
        });
    }

    let mut warnings = Vec::new();
    let mut retained: Vec<(EventId, EventSpan, NaiveDate, NaiveDate)> = Vec::new();

    for event in events {
        if !event.has_valid_interval() {
            tracing::warn!(id = %event.id, "skipping event with empty interval");
            warnings.push(LayoutWarning::InvalidInterval {
                id: event.id.clone(),
            });
            continue;
        }

        let (span, unknown_tz) = EventSpan::resolve(event);
        if unknown_tz {
            tracing::warn!(id = %event.id, tz = %event.tz, "unknown timezone, using stored offset");
            warnings.push(LayoutWarning::UnknownTimezone {
                id: event.id.clone(),
                tz: event.tz.clone(),
            });
        }

        match span.clamp(visible_start, visible_end) {
            Some((first, last)) => retained.push((event.id.clone(), span, first, last)),
            None => tracing::debug!(id = %event.id, "event outside visible range"),
        }
    }

    let candidates: Vec<(EventId, EventSpan)> = retained
        .iter()
        .map(|(id, span, _, _)| (id.clone(), *span))
        .collect();
    let lanes = assign_lanes(&candidates);

    // Bucketize, keeping the effective start around for the per-day sort
    let mut days: BTreeMap<NaiveDate, Vec<(u32, DateTime<Utc>, DayOccurrence)>> = BTreeMap::new();
    for (id, span, first, last) in &retained {
        let lane = lanes.get(id).copied().unwrap_or(0);
        let span_days = u32::try_from((*last - *first).num_days() + 1).unwrap_or(1);

        for date in first.iter_days().take_while(|d| d <= last) {
            let col = week_column(date, config.week_start);
            let starts_bar = date == *first || col == 0;
            let width_fraction = if starts_bar {
                let remaining_span = (*last - date).num_days() + 1;
                let remaining_row = i64::from(7 - col);
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "bar widths are at most 7 day cells"
                )]
                let width = remaining_span.min(remaining_row) as f32;
                width
            } else {
                0.0
            };

            days.entry(date).or_default().push((
                lane,
                span.start_utc,
                DayOccurrence {
                    event_id: id.clone(),
                    date,
                    lane,
                    span_days,
                    is_first_day: date == *first,
                    is_last_day: date == *last,
                    offset_fraction: 0.0,
                    width_fraction,
                },
            ));
        }
    }

    // Grid builder: lane ascending, then effective start, then id
    let days = days
        .into_iter()
        .map(|(date, mut entries)| {
            entries.sort_by(|(lane_a, start_a, occ_a), (lane_b, start_b, occ_b)| {
                lane_a
                    .cmp(lane_b)
                    .then_with(|| start_a.cmp(start_b))
                    .then_with(|| occ_a.event_id.cmp(&occ_b.event_id))
            });
            (date, entries.into_iter().map(|(_, _, occ)| occ).collect())
        })
        .collect();

    Ok(Layout {
        days,
        lanes,
        warnings,
    })
}
