//! Storage error handling
//!
//! Typed errors for the persistence gateway. `CapacityExceeded` is
//! kept distinct from everything else so the caller can prompt the
//! user to export before clearing; all variants are recoverable and
//! never corrupt the in-memory session list.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting the session list
#[derive(Error, Debug)]
pub enum StorageError {
    /// Disk is full or a quota was exceeded
    #[error(
        "Storage capacity exceeded while writing '{path}'. Export your data, then clear or free up space."
    )]
    CapacityExceeded {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read the session file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the session file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to encode the session list
    #[error("Failed to serialize session list: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Create an error from an I/O error with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full_error(&error) => StorageError::CapacityExceeded {
                path,
                source: error,
            },
            _ => StorageError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Whether this failure should prompt the export-before-clear flow
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, StorageError::CapacityExceeded { .. })
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::CapacityExceeded { .. } => {
                Some("Export your sessions to a backup file, then clear old data or free up disk space.")
            }
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    // Check error message for disk full indicators
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::from_io(io_err, PathBuf::from("/test/path"));

        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert!(!err.is_capacity_exceeded());
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_disk_full_detection() {
        let io_err = io::Error::new(io::ErrorKind::Other, "No space left on device");
        let err = StorageError::from_io(io_err, PathBuf::from("/full/disk"));

        assert!(err.is_capacity_exceeded());
        assert!(err.recovery_suggestion().unwrap().contains("Export"));
    }

    #[test]
    fn test_quota_exceeded_detection() {
        let io_err = io::Error::new(io::ErrorKind::Other, "Quota exceeded");
        let err = StorageError::from_io(io_err, PathBuf::from("/quota"));

        assert!(err.is_capacity_exceeded());
    }

    #[test]
    fn test_unclassified_write_error() {
        let io_err = io::Error::new(io::ErrorKind::Other, "something odd");
        let err = StorageError::from_io(io_err, PathBuf::from("/test/file"));

        assert!(matches!(err, StorageError::WriteError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::CapacityExceeded {
            path: PathBuf::from("/data/sessions.json"),
            source: io::Error::new(io::ErrorKind::Other, "no space left"),
        };

        let msg = err.to_string();
        assert!(msg.contains("capacity exceeded"));
        assert!(msg.contains("/data/sessions.json"));
    }
}
