//! Export, import, clear, and sample-data command handlers
//!
//! Everything here that discards data (replace import, clear, sample)
//! goes through an explicit confirmation; merge import does not, since
//! it never loses a record.

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Local;

use pagelog_core::{sample, transfer, ImportMode, JsonFileStore, Tracker};

use crate::commands::storage_err;
use crate::output::Output;
use crate::prompt::confirm;

/// Export the full session list to a backup file
pub fn export(
    tracker: &Tracker<JsonFileStore>,
    path: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let path = path.unwrap_or_else(|| {
        PathBuf::from(transfer::backup_file_name(Local::now().date_naive()))
    });

    tracker.export_to(&path)?;
    output.success(&format!(
        "Exported {} session(s) to {}",
        tracker.session_count(),
        path.display()
    ));
    Ok(())
}

/// Import a backup file, merging by default
pub fn import(
    tracker: &mut Tracker<JsonFileStore>,
    path: PathBuf,
    replace: bool,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let incoming = transfer::read_backup(&path)?;

    let mode = if replace {
        if !yes {
            if !output.should_prompt() {
                bail!("Replacing all data requires --yes in non-interactive mode.");
            }
            println!(
                "This will replace your {} existing session(s) with {} imported one(s).",
                tracker.session_count(),
                incoming.len()
            );
            if !confirm("Continue?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };

    let report = tracker.import(incoming, mode).map_err(storage_err)?;
    output.print_import_report(&report);
    Ok(())
}

/// Delete the entire collection
pub fn clear(tracker: &mut Tracker<JsonFileStore>, yes: bool, output: &Output) -> Result<()> {
    if !yes {
        if !output.should_prompt() {
            bail!("Clearing all data requires --yes in non-interactive mode.");
        }
        println!(
            "This will delete all {} session(s).",
            tracker.session_count()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    tracker.clear_all().map_err(storage_err)?;
    output.success("All sessions deleted.");
    Ok(())
}

/// Replace the collection with generated sample data
pub fn load_sample(tracker: &mut Tracker<JsonFileStore>, yes: bool, output: &Output) -> Result<()> {
    if !yes && tracker.session_count() > 0 {
        if !output.should_prompt() {
            bail!("Loading sample data replaces your sessions; pass --yes to proceed.");
        }
        println!(
            "This will replace your {} session(s) with sample data.",
            tracker.session_count()
        );
        if !confirm("Continue?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let data = sample::generate_sample_data(Local::now().date_naive());
    let report = tracker.import(data, ImportMode::Replace).map_err(storage_err)?;
    output.success(&format!("Loaded {} sample session(s).", report.total_count));
    Ok(())
}
