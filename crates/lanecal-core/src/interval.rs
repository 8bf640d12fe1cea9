//! Interval predicates and per-event day-span resolution.
//!
//! Everything here works on half-open `[start, end)` ranges. Calendar-day
//! math happens in the event's own timezone: an event is active on a local
//! date `d` iff its interval intersects `[startOfDay(d), startOfDay(d + 1))`
//! there.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::event::CalendarEvent;

/// Half-open interval overlap test.
///
/// A zero-length (or inverted) interval never overlaps anything, including
/// itself.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    if a_start >= a_end || b_start >= b_end {
        return false;
    }
    a_start < b_end && b_start < a_end
}

/// An event's resolved footprint: the local calendar days it touches and its
/// effective instants.
///
/// Lane collision is day-granular; the instants only order events
/// deterministically within a day. Computed once per event per layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpan {
    /// First local date the event is active on.
    pub first_day: NaiveDate,
    /// Last local date the event is active on (inclusive).
    pub last_day: NaiveDate,
    /// Effective start, used as an ordering tie-break. For all-day events
    /// this is local midnight of `first_day`, so they precede timed events
    /// starting the same date.
    pub start_utc: DateTime<Utc>,
    /// Effective end of the span (exclusive). Local midnight after
    /// `last_day` for all-day events, the authored end otherwise.
    pub end_utc: DateTime<Utc>,
}

impl EventSpan {
    /// Resolves an event's span in its authoring timezone.
    ///
    /// Returns the span plus `true` when the event carried a non-empty `tz`
    /// that did not parse as an IANA zone; the stored fixed offset is used
    /// as the fallback interpretation in that case. An empty `tz` means the
    /// offset is the intended zone and is not reported.
    pub fn resolve(event: &CalendarEvent) -> (Self, bool) {
        if event.tz.is_empty() {
            (Self::in_zone(event, &event.start.timezone()), false)
        } else if let Ok(zone) = event.tz.parse::<Tz>() {
            (Self::in_zone(event, &zone), false)
        } else {
            (Self::in_zone(event, &event.start.timezone()), true)
        }
    }

    fn in_zone<Z: TimeZone>(event: &CalendarEvent, zone: &Z) -> Self {
        let local_start = event.start.with_timezone(zone);
        let local_end = event.end.with_timezone(zone);

        let first_day = local_start.date_naive();
        let mut last_day = local_end.date_naive();
        // end is exclusive: an event ending exactly at midnight does not
        // touch the day of `end`.
        if local_end.time() == NaiveTime::MIN {
            last_day = last_day.pred_opt().unwrap_or(last_day);
        }
        // start < end guarantees last_day >= first_day here
        let last_day = last_day.max(first_day);

        let offset = event.start.timezone();
        let (start_utc, end_utc) = if event.is_all_day {
            let after_last = last_day.succ_opt().unwrap_or(last_day);
            (
                local_midnight(zone, first_day, offset),
                local_midnight(zone, after_last, offset),
            )
        } else {
            (event.start.to_utc(), event.end.to_utc())
        };

        Self {
            first_day,
            last_day,
            start_utc,
            end_utc,
        }
    }

    /// Number of local calendar days the event touches, before clamping.
    pub fn total_days(&self) -> u32 {
        u32::try_from((self.last_day - self.first_day).num_days() + 1).unwrap_or(1)
    }

    /// Clamps the touched day range to the visible range.
    ///
    /// Returns `None` when the event lies entirely outside it.
    pub fn clamp(
        &self,
        visible_start: NaiveDate,
        visible_end: NaiveDate,
    ) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.first_day.max(visible_start);
        let last = self.last_day.min(visible_end);
        (first <= last).then_some((first, last))
    }
}

/// The sorted visible dates an event is active on.
///
/// Convenience wrapper over [`EventSpan::resolve`] + [`EventSpan::clamp`];
/// the layout pass itself works on the span directly.
pub fn days_touched(
    event: &CalendarEvent,
    visible_start: NaiveDate,
    visible_end: NaiveDate,
) -> Vec<NaiveDate> {
    let (span, _) = EventSpan::resolve(event);
    span.clamp(visible_start, visible_end)
        .map_or_else(Vec::new, |(first, last)| {
            first.iter_days().take_while(|d| *d <= last).collect()
        })
}

/// Local midnight of `date` in `zone`, as a UTC instant.
///
/// A DST gap at midnight resolves to the earliest valid instant; if the zone
/// cannot produce one at all, the event's stored offset is used instead.
fn local_midnight<Z: TimeZone>(zone: &Z, date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    zone.from_local_datetime(&naive).earliest().map_or_else(
        || {
            offset
                .from_local_datetime(&naive)
                .earliest()
                .map_or_else(|| naive.and_utc(), |t| t.to_utc())
        },
        |t| t.to_utc(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventId;
    use chrono::Duration;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>, tz: &str) -> CalendarEvent {
        CalendarEvent {
            id: EventId::new(id).unwrap(),
            label: String::new(),
            description: String::new(),
            color: String::new(),
            is_all_day: false,
            start: start.fixed_offset(),
            end: end.fixed_offset(),
            tz: tz.to_string(),
        }
    }

    #[test]
    fn overlaps_half_open() {
        let a = (utc(2025, 3, 10, 9, 0), utc(2025, 3, 10, 10, 0));
        let b = (utc(2025, 3, 10, 10, 0), utc(2025, 3, 10, 11, 0));
        let c = (utc(2025, 3, 10, 9, 30), utc(2025, 3, 10, 10, 30));

        // Touching endpoints do not overlap
        assert!(!overlaps(a.0, a.1, b.0, b.1));
        assert!(overlaps(a.0, a.1, c.0, c.1));
        assert!(overlaps(b.0, b.1, c.0, c.1));
    }

    #[test]
    fn zero_length_interval_never_overlaps() {
        let p = utc(2025, 3, 10, 9, 30);
        let a = (utc(2025, 3, 10, 9, 0), utc(2025, 3, 10, 10, 0));
        // Degenerate point strictly inside `a` still does not overlap
        assert!(!overlaps(p, p, a.0, a.1));
        assert!(!overlaps(a.0, a.1, p, p));
        assert!(!overlaps(p, p, p, p));
    }

    #[test]
    fn single_day_event_touches_one_day() {
        let e = event("e", utc(2025, 3, 10, 9, 0), utc(2025, 3, 10, 10, 0), "");
        let (span, unknown) = EventSpan::resolve(&e);
        assert!(!unknown);
        assert_eq!(span.first_day, date(2025, 3, 10));
        assert_eq!(span.last_day, date(2025, 3, 10));
        assert_eq!(span.total_days(), 1);
    }

    #[test]
    fn end_at_midnight_excludes_final_day() {
        let e = event("e", utc(2025, 3, 10, 18, 0), utc(2025, 3, 11, 0, 0), "");
        let (span, _) = EventSpan::resolve(&e);
        assert_eq!(span.last_day, date(2025, 3, 10));

        let f = event("f", utc(2025, 3, 10, 18, 0), utc(2025, 3, 11, 0, 1), "");
        let (span, _) = EventSpan::resolve(&f);
        assert_eq!(span.last_day, date(2025, 3, 11));
    }

    #[test]
    fn day_boundaries_follow_event_timezone() {
        // 23:00 UTC on March 10 is already March 11 in Tokyo
        let e = event(
            "e",
            utc(2025, 3, 10, 23, 0),
            utc(2025, 3, 10, 23, 30),
            "Asia/Tokyo",
        );
        let (span, unknown) = EventSpan::resolve(&e);
        assert!(!unknown);
        assert_eq!(span.first_day, date(2025, 3, 11));
        assert_eq!(span.last_day, date(2025, 3, 11));
    }

    #[test]
    fn unknown_timezone_falls_back_to_offset() {
        let e = event(
            "e",
            utc(2025, 3, 10, 9, 0),
            utc(2025, 3, 10, 10, 0),
            "Not/AZone",
        );
        let (span, unknown) = EventSpan::resolve(&e);
        assert!(unknown);
        assert_eq!(span.first_day, date(2025, 3, 10));
    }

    #[test]
    fn all_day_effective_interval_is_midnight_to_midnight() {
        let mut e = event("e", utc(2025, 3, 10, 14, 0), utc(2025, 3, 12, 11, 0), "");
        e.is_all_day = true;
        let (span, _) = EventSpan::resolve(&e);
        assert_eq!(span.first_day, date(2025, 3, 10));
        assert_eq!(span.last_day, date(2025, 3, 12));
        assert_eq!(span.start_utc, utc(2025, 3, 10, 0, 0));
        assert_eq!(span.end_utc, utc(2025, 3, 13, 0, 0));
    }

    #[test]
    fn clamp_trims_to_visible_range() {
        let e = event("e", utc(2025, 2, 25, 9, 0), utc(2025, 3, 5, 10, 0), "");
        let (span, _) = EventSpan::resolve(&e);
        assert_eq!(
            span.clamp(date(2025, 3, 1), date(2025, 3, 31)),
            Some((date(2025, 3, 1), date(2025, 3, 5)))
        );
        assert_eq!(span.clamp(date(2025, 4, 1), date(2025, 4, 30)), None);
    }

    #[test]
    fn days_touched_lists_clamped_dates() {
        let e = event("e", utc(2025, 3, 10, 9, 0), utc(2025, 3, 12, 10, 0), "");
        let days = days_touched(&e, date(2025, 3, 11), date(2025, 3, 31));
        assert_eq!(days, vec![date(2025, 3, 11), date(2025, 3, 12)]);
    }

    #[test]
    fn multi_day_span_counts_days() {
        let e = event(
            "e",
            utc(2025, 3, 7, 9, 0),
            utc(2025, 3, 7, 9, 0) + Duration::days(3),
            "",
        );
        let (span, _) = EventSpan::resolve(&e);
        assert_eq!(span.total_days(), 4);
    }
}
