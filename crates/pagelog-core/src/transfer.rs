//! Backup export and import files
//!
//! The only wire format pagelog has: a pretty-printed JSON array of
//! session records, identical in shape to the persisted list. Import
//! is all-or-nothing; a malformed file is rejected whole, never
//! partially applied.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Session;

/// Why an import file was rejected. All variants leave state untouched.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{path}' does not contain a list of sessions")]
    NotAList { path: PathBuf },
}

/// File name for a new export: `reading-tracker-backup-<ISO-date>.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("reading-tracker-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Write the full session list to `path`, pretty-printed.
pub fn write_backup(path: &Path, sessions: &[Session]) -> Result<()> {
    let json = serde_json::to_string_pretty(sessions).context("Failed to serialize sessions")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write backup file {:?}", path))?;
    Ok(())
}

/// Read and validate an import file.
///
/// The top-level value must be a JSON array; anything else (including
/// a single object) is rejected before any record is looked at.
pub fn read_backup(path: &Path) -> Result<Vec<Session>, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| ImportError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })?;

    if !value.is_array() {
        return Err(ImportError::NotAList {
            path: path.to_path_buf(),
        });
    }

    serde_json::from_value(value).map_err(|e| ImportError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })
}
