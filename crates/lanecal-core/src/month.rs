//! Month-grid helpers for visible-range providers.
//!
//! The engine itself never assumes a grid shape; these helpers exist for
//! callers rendering the usual month view with leading/trailing days from
//! the neighboring months.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// 0-based column of `date` within its week row, for a grid whose rows
/// start on `week_start`.
pub fn week_column(date: NaiveDate, week_start: Weekday) -> u32 {
    (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7
}

/// The whole-week date range a month view renders: from the `week_start` on
/// or before the 1st, through the end of the week containing the month's
/// last day.
///
/// Returns `None` for an invalid year/month or when the padded range leaves
/// the representable date range.
pub fn month_grid_range(
    year: i32,
    month: u32,
    week_start: Weekday,
) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month.pred_opt()?;

    let grid_start = first.checked_sub_days(Days::new(u64::from(week_column(first, week_start))))?;
    let grid_end = last.checked_add_days(Days::new(u64::from(6 - week_column(last, week_start))))?;
    Some((grid_start, grid_end))
}
