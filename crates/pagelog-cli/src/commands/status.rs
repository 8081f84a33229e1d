//! Status command handler

use anyhow::{Context, Result};

use pagelog_core::{Config, JsonFileStore, Tracker};

use crate::output::{format_duration, Output, OutputFormat};

/// Show where data lives and a totals snapshot
pub fn show(tracker: &Tracker<JsonFileStore>, output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let totals = tracker.totals();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "sessions_file": config.sessions_path(),
                    "sessions_file_exists": config.sessions_path().exists(),
                    "totals": totals,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", totals.session_count);
        }
        OutputFormat::Human => {
            println!("pagelog Status");
            println!("==============");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.sessions_path().display());
            println!(
                "  State:    {}",
                if config.sessions_path().exists() {
                    "saved"
                } else {
                    "empty (nothing logged yet)"
                }
            );
            println!();
            println!("Contents:");
            println!("  Sessions: {}", totals.session_count);
            println!("  Pages:    {}", totals.total_pages);
            println!("  Time:     {}", format_duration(totals.total_minutes));
        }
    }

    Ok(())
}
