//! Heatmap command handler

use anyhow::Result;

use pagelog_core::{stats, JsonFileStore, Tracker};

use crate::commands::parse_month;
use crate::output::Output;

/// Show the per-day activity calendar
///
/// Days with no sessions are simply absent; the renderer treats them
/// as level 0.
pub fn show(
    tracker: &Tracker<JsonFileStore>,
    month: Option<String>,
    output: &Output,
) -> Result<()> {
    let days = match month {
        Some(m) => {
            let (year, month) = parse_month(&m)?;
            stats::by_day(&tracker.monthly(year, month))
        }
        None => tracker.by_day(),
    };

    output.print_heatmap(&days);
    Ok(())
}
