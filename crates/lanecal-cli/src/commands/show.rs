//! Show command: lay out a month and print it.

use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Days, Local, NaiveDate};
use lanecal_core::{CalendarEvent, EventId, Layout, LayoutConfig, layout_calendar, month_grid_range};

use crate::config::Config;

/// Character width of one day cell in the ASCII grid.
const CELL_WIDTH: usize = 14;

pub fn run(
    config: &Config,
    events_path: &Path,
    year: Option<i32>,
    month: Option<u32>,
    week_start: Option<&str>,
    json: bool,
) -> Result<()> {
    let week_start = config.week_start(week_start)?;

    let today = Local::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());
    let (grid_start, grid_end) = month_grid_range(year, month, week_start)
        .with_context(|| format!("invalid month: {year}-{month:02}"))?;

    let events = super::util::load_events(events_path)?;
    let layout = layout_calendar(&events, grid_start, grid_end, &LayoutConfig { week_start })
        .context("layout failed")?;

    for warning in &layout.warnings {
        tracing::warn!(%warning, "layout warning");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        print!("{}", render_month(&events, &layout, grid_start, grid_end));
    }
    Ok(())
}

/// Renders the layout as an ASCII month grid, one header line plus one line
/// per occupied lane for each week row.
pub fn render_month(
    events: &[CalendarEvent],
    layout: &Layout,
    grid_start: NaiveDate,
    grid_end: NaiveDate,
) -> String {
    let labels: HashMap<&EventId, &str> = events
        .iter()
        .map(|e| (&e.id, e.label.as_str()))
        .collect();

    let mut out = String::new();
    let mut row_start = grid_start;
    while row_start <= grid_end {
        let days: Vec<NaiveDate> = (0..7)
            .filter_map(|i| row_start.checked_add_days(Days::new(i)))
            .collect();

        for day in &days {
            let _ = write!(out, "{:<CELL_WIDTH$}", day.format("%b %e").to_string());
        }
        out.push('\n');

        let max_lane = days
            .iter()
            .filter_map(|d| layout.days.get(d))
            .flatten()
            .map(|o| o.lane)
            .max();
        if let Some(max_lane) = max_lane {
            for lane in 0..=max_lane {
                out.push_str(&render_lane_row(layout, &labels, &days, lane));
                out.push('\n');
            }
        }
        out.push('\n');

        match row_start.checked_add_days(Days::new(7)) {
            Some(next) => row_start = next,
            None => break,
        }
    }
    out
}

/// One lane's line across a week row. Bars span multiple cells; cells the
/// bar covers are skipped.
fn render_lane_row(
    layout: &Layout,
    labels: &HashMap<&EventId, &str>,
    days: &[NaiveDate],
    lane: u32,
) -> String {
    let mut line = String::new();
    let mut covered = 0usize;
    for day in days {
        if covered > 0 {
            covered -= 1;
            continue;
        }
        // Lanes hold at most one event per day, so at most one bar can
        // anchor here
        let bar = layout
            .days
            .get(day)
            .and_then(|occurrences| occurrences.iter().find(|o| o.lane == lane && o.starts_bar()));

        match bar {
            Some(occurrence) => {
                #[expect(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "bar widths are small positive cell counts"
                )]
                let cells = (occurrence.width_fraction as usize).max(1);
                let width = cells * CELL_WIDTH;

                let label = labels
                    .get(&occurrence.event_id)
                    .copied()
                    .filter(|l| !l.is_empty())
                    .unwrap_or(occurrence.event_id.as_str());

                // Pad by char count, not byte length, so multibyte labels
                // keep the grid aligned
                let inner = width - 2;
                let truncated: String = label.chars().take(inner).collect();
                let padding = inner - truncated.chars().count();
                let _ = write!(line, "[{truncated}{:padding$}]", "");
                covered = cells - 1;
            }
            None => line.push_str(&" ".repeat(CELL_WIDTH)),
        }
    }
    line.trim_end().to_string()
}
