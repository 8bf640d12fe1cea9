//! Check command: validate an events file.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use lanecal_core::EventSpan;

/// Parses and validates the events file, printing one line per problem.
///
/// Unknown timezones are reported but not fatal (layout falls back to the
/// stored offset); empty intervals and duplicate ids are.
pub fn run(events_path: &Path) -> Result<()> {
    let events = super::util::load_events(events_path)?;

    let mut problems = 0;
    let mut seen = HashSet::new();
    for event in &events {
        if !seen.insert(&event.id) {
            println!("{}: duplicate event id", event.id);
            problems += 1;
        }
        if event.has_valid_interval() {
            let (_, unknown_tz) = EventSpan::resolve(event);
            if unknown_tz {
                println!(
                    "{}: unknown timezone {:?} (layout will use the stored offset)",
                    event.id, event.tz
                );
            }
        } else {
            println!("{}: empty or inverted interval", event.id);
            problems += 1;
        }
    }

    if problems > 0 {
        anyhow::bail!("{problems} invalid event(s) in {}", events_path.display());
    }
    println!("{} event(s) OK", events.len());
    Ok(())
}
