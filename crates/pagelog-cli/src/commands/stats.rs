//! Statistics command handlers

use anyhow::Result;

use pagelog_core::{stats, JsonFileStore, Tracker};

use crate::commands::parse_month;
use crate::output::Output;

/// Show the totals dashboard, optionally for a single month
pub fn totals(
    tracker: &Tracker<JsonFileStore>,
    month: Option<String>,
    output: &Output,
) -> Result<()> {
    let totals = match month {
        Some(m) => {
            let (year, month) = parse_month(&m)?;
            stats::totals(&tracker.monthly(year, month))
        }
        None => tracker.totals(),
    };

    output.print_totals(&totals);
    Ok(())
}

/// Show per-book statistics
pub fn books(tracker: &Tracker<JsonFileStore>, output: &Output) -> Result<()> {
    output.print_books(&tracker.by_book());
    Ok(())
}
