//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::Context;
use lanecal_core::CalendarEvent;

/// Loads an events file: a JSON array of calendar events.
pub fn load_events(path: &Path) -> anyhow::Result<Vec<CalendarEvent>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events file {}", path.display()))?;
    let events: Vec<CalendarEvent> =
        serde_json::from_str(&data).context("failed to parse events file")?;
    tracing::debug!(count = events.len(), "loaded events");
    Ok(events)
}
