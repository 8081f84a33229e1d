//! JSON file persistence for the session list
//!
//! The whole collection lives in one JSON array under the data
//! directory. Writes go to a temp file first and are renamed into
//! place, so a save either fully lands or leaves the previous file
//! intact; no partial write is ever observable.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::config::Config;
use crate::models::Session;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence boundary for the session list.
///
/// Load is total over missing data: no file means an empty list. A
/// corrupt file is set aside with a warning rather than failing, so a
/// bad byte can never lock the user out of the app.
pub trait SessionStore {
    fn load(&self) -> StorageResult<Vec<Session>>;
    fn save_all(&self, sessions: &[Session]) -> StorageResult<()>;
    fn clear(&self) -> StorageResult<()>;
}

/// File-backed store at `<data_dir>/sessions.json`
pub struct JsonFileStore {
    config: Config,
}

impl JsonFileStore {
    /// Create a store with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a session file exists on disk
    pub fn exists(&self) -> bool {
        self.config.sessions_path().exists()
    }

    /// Move an unparsable session file aside so the next save starts fresh
    fn quarantine_corrupt_file(&self) {
        let path = self.config.sessions_path();
        let backup = self.config.corrupt_backup_path();
        if let Err(e) = fs::rename(&path, &backup) {
            warn!(path = %path.display(), error = %e, "could not set aside corrupt session file");
        } else {
            warn!(backup = %backup.display(), "corrupt session file moved aside");
        }
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> StorageResult<Vec<Session>> {
        let path = self.config.sessions_path();

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| StorageError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        match serde_json::from_str(&content) {
            Ok(sessions) => Ok(sessions),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "session file is unreadable, starting with an empty list");
                self.quarantine_corrupt_file();
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, sessions: &[Session]) -> StorageResult<()> {
        let path = self.config.sessions_path();
        let bytes = serde_json::to_vec(sessions)?;
        atomic_write(&path, &bytes)
    }

    fn clear(&self) -> StorageResult<()> {
        let path = self.config.sessions_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::from_io(e, path))?;
        }
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;
    }

    // Create temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;

    Ok(())
}
