//! Month-calendar event layout engine.
//!
//! This crate contains the pure transformation behind a month view:
//! - Interval utilities: half-open overlap tests and per-event day spans
//! - Lane assignment: greedy interval-graph coloring so events never overlap
//!   visually and multi-day bars keep one lane across their whole span
//! - Bucketizing and grid building: one lane-annotated occurrence per
//!   (event, visible day), grouped and sorted for the renderer
//!
//! The whole pipeline is [`layout_calendar`]: a pure function of the event
//! collection and the visible range, safe to recompute on every input
//! change. Rendering, event editing and persistence are the caller's
//! business.

pub mod event;
pub mod interval;
pub mod lanes;
pub mod layout;
pub mod month;
pub mod types;

pub use event::{CalendarEvent, next_quarter_hour};
pub use interval::{EventSpan, days_touched, overlaps};
pub use lanes::assign_lanes;
pub use layout::{
    DayOccurrence, Layout, LayoutConfig, LayoutError, LayoutWarning, layout_calendar,
};
pub use month::{month_grid_range, week_column};
pub use types::{EventId, ValidationError};
