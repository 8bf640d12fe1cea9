//! Calendar event records.

use chrono::{DateTime, Duration, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::EventId;

/// A committed calendar event.
///
/// Events are owned by the caller and immutable for the duration of a layout
/// pass; the engine only ever reads them. `start`/`end` are half-open
/// (`end` exclusive) and `start < end` is required — events violating that
/// are excluded from layout and reported, not fatal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Unique identifier, stable across re-renders.
    pub id: EventId,

    /// Display label. Opaque to the engine.
    #[serde(default)]
    pub label: String,

    /// Longer display text. Opaque to the engine.
    #[serde(default)]
    pub description: String,

    /// Display color token (e.g. `#3b82f6`). Opaque to the engine.
    #[serde(default)]
    pub color: String,

    /// If true, time-of-day on `start`/`end` is ignored by layout.
    #[serde(default)]
    pub is_all_day: bool,

    /// Start instant as authored, offset included.
    pub start: DateTime<FixedOffset>,

    /// End instant as authored, exclusive.
    pub end: DateTime<FixedOffset>,

    /// IANA identifier of the authoring timezone, used only to locate local
    /// day boundaries. Empty means "use the stored offset as-is".
    #[serde(default)]
    pub tz: String,
}

impl CalendarEvent {
    /// Whether the event's interval is non-empty.
    pub fn has_valid_interval(&self) -> bool {
        self.start < self.end
    }

    /// Builds a draft event anchored at `date`: all-day, one quarter-hour
    /// long starting at the next quarter-hour boundary, fresh random ID.
    #[must_use]
    pub fn draft(date: DateTime<FixedOffset>) -> Self {
        let start = next_quarter_hour(date, 0);
        Self {
            id: EventId::random(),
            label: String::new(),
            description: String::new(),
            color: "#3b82f6".to_string(),
            is_all_day: true,
            start,
            end: next_quarter_hour(date, 1),
            tz: String::new(),
        }
    }
}

/// Pushes `date` forward to the next quarter-hour boundary, then adds
/// `additional_quarter_hours` more quarter hours.
///
/// A timestamp already on a boundary stays put (ceiling rounding).
#[must_use]
pub fn next_quarter_hour(
    date: DateTime<FixedOffset>,
    additional_quarter_hours: i64,
) -> DateTime<FixedOffset> {
    let into_quarter = Duration::seconds(i64::from(date.minute() % 15) * 60)
        + Duration::seconds(i64::from(date.second()))
        + Duration::nanoseconds(i64::from(date.nanosecond()));
    let floor = date - into_quarter;
    let ceil = if into_quarter.is_zero() {
        floor
    } else {
        floor + Duration::minutes(15)
    };
    ceil + Duration::minutes(15 * additional_quarter_hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 10, h, m, s)
            .single()
            .unwrap()
    }

    #[test]
    fn next_quarter_hour_rounds_up() {
        assert_eq!(next_quarter_hour(at(9, 7, 30), 0), at(9, 15, 0));
        assert_eq!(next_quarter_hour(at(9, 59, 1), 0), at(10, 0, 0));
    }

    #[test]
    fn next_quarter_hour_keeps_boundary() {
        assert_eq!(next_quarter_hour(at(9, 45, 0), 0), at(9, 45, 0));
    }

    #[test]
    fn next_quarter_hour_adds_quarters() {
        assert_eq!(next_quarter_hour(at(9, 0, 0), 2), at(9, 30, 0));
        assert_eq!(next_quarter_hour(at(9, 1, 0), 1), at(9, 30, 0));
    }

    #[test]
    fn draft_is_quarter_hour_long() {
        let draft = CalendarEvent::draft(at(14, 3, 0));
        assert!(draft.is_all_day);
        assert_eq!(draft.start, at(14, 15, 0));
        assert_eq!(draft.end, at(14, 30, 0));
        assert_eq!(draft.color, "#3b82f6");
        assert!(draft.has_valid_interval());
    }

    #[test]
    fn event_serialization_roundtrip() {
        let event = CalendarEvent {
            id: EventId::new("evt-1").unwrap(),
            label: "Standup".into(),
            description: String::new(),
            color: "#3b82f6".into(),
            is_all_day: false,
            start: at(9, 0, 0),
            end: at(9, 30, 0),
            tz: "Europe/Berlin".into(),
        };

        let json = serde_json::to_string(&event).unwrap();
        let parsed: CalendarEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn event_deserializes_with_defaults() {
        let json = r#"{
            "id": "evt-2",
            "start": "2025-03-10T09:00:00+00:00",
            "end": "2025-03-10T10:00:00+00:00"
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert!(!event.is_all_day);
        assert!(event.tz.is_empty());
        assert!(event.has_valid_interval());
    }

    #[test]
    fn event_rejects_empty_id() {
        let json = r#"{
            "id": "",
            "start": "2025-03-10T09:00:00+00:00",
            "end": "2025-03-10T10:00:00+00:00"
        }"#;
        let result: Result<CalendarEvent, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
