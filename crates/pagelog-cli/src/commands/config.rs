//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use pagelog_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "sessions_file": config.sessions_path(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  data_dir: {}", config.data_dir.display());
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "data_dir" => {
            config.data_dir = PathBuf::from(&value);
        }
        _ => bail!("Unknown configuration key: {}. Valid keys: data_dir", key),
    }

    config.save().context("Failed to save configuration")?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
