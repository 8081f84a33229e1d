//! Owned application state
//!
//! The `Tracker` holds the in-memory session list and the persistence
//! gateway behind it. It is the only component that touches storage;
//! the aggregation and merge engines stay pure functions over the
//! list it owns.
//!
//! Every mutation follows the same save-then-commit shape: build the
//! new list, persist it, and only on success swap it into memory. A
//! failed save therefore never loses or corrupts what the user
//! already has.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = Tracker::open()?;
//!
//! let session = SessionDraft { pages: Some(20), ..Default::default() }.build()?;
//! tracker.add(session)?;
//!
//! let totals = tracker.totals();
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::merge;
use crate::models::Session;
use crate::stats::{self, BookSummary, DayBucket, Totals};
use crate::storage::{JsonFileStore, SessionStore, StorageResult};
use crate::transfer;

/// Which import semantics the user confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Union with duplicate suppression.
    Merge,
    /// Full overwrite of the existing list.
    Replace,
}

/// What an import did, for user-facing reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub added_count: usize,
    pub duplicate_count: usize,
    pub total_count: usize,
}

/// Why an id lookup resolved to no single session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FindError {
    #[error("no session found matching: {0}")]
    NotFound(String),
    #[error("'{prefix}' matches {count} sessions; use more characters")]
    Ambiguous { prefix: String, count: usize },
}

/// In-memory session list plus its persistence gateway.
pub struct Tracker<S: SessionStore> {
    sessions: Vec<Session>,
    store: S,
}

impl Tracker<JsonFileStore> {
    /// Open the tracker against the default data directory.
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the tracker with a specific configuration.
    pub fn open_with_config(config: Config) -> Result<Self> {
        Self::with_store(JsonFileStore::new(config)).context("Failed to load session list")
    }
}

impl<S: SessionStore> Tracker<S> {
    /// Open against an arbitrary store (test doubles included).
    pub fn with_store(store: S) -> StorageResult<Self> {
        let sessions = store.load()?;
        Ok(Self { sessions, store })
    }

    /// The full session list, in persisted order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Look up a session by id, accepting a unique prefix.
    pub fn find(&self, id_or_prefix: &str) -> Result<&Session, FindError> {
        let matches: Vec<&Session> = self
            .sessions
            .iter()
            .filter(|s| s.id.as_deref().is_some_and(|id| id.starts_with(id_or_prefix)))
            .collect();
        match matches.as_slice() {
            [] => Err(FindError::NotFound(id_or_prefix.to_string())),
            [session] => Ok(*session),
            _ => Err(FindError::Ambiguous {
                prefix: id_or_prefix.to_string(),
                count: matches.len(),
            }),
        }
    }

    // ==================== Mutations ====================

    /// Append a newly created session and persist.
    pub fn add(&mut self, session: Session) -> StorageResult<()> {
        let mut next = self.sessions.clone();
        next.push(session);
        self.commit(next)
    }

    /// Update the notes on a session. Returns false if no session
    /// matches the id. Notes are the only field editable post-hoc.
    pub fn update_notes(&mut self, id: &str, notes: &str) -> StorageResult<bool> {
        let Some(pos) = self
            .sessions
            .iter()
            .position(|s| s.id.as_deref() == Some(id))
        else {
            return Ok(false);
        };

        let mut next = self.sessions.clone();
        next[pos].set_notes(notes);
        self.commit(next)?;
        Ok(true)
    }

    /// Remove a session by id. Returns false if nothing matched.
    pub fn delete(&mut self, id: &str) -> StorageResult<bool> {
        let mut next = self.sessions.clone();
        let before = next.len();
        next.retain(|s| s.id.as_deref() != Some(id));
        if next.len() == before {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Drop the entire collection.
    pub fn clear_all(&mut self) -> StorageResult<()> {
        self.store.clear()?;
        self.sessions.clear();
        Ok(())
    }

    /// Apply an already-validated incoming list in the given mode.
    pub fn import(&mut self, incoming: Vec<Session>, mode: ImportMode) -> StorageResult<ImportReport> {
        let (next, report) = match mode {
            ImportMode::Merge => {
                let outcome = merge::merge(&self.sessions, &incoming);
                let report = ImportReport {
                    added_count: outcome.added_count,
                    duplicate_count: outcome.duplicate_count,
                    total_count: outcome.merged.len(),
                };
                (outcome.merged, report)
            }
            ImportMode::Replace => {
                let next = merge::replace(incoming);
                let report = ImportReport {
                    added_count: next.len(),
                    duplicate_count: 0,
                    total_count: next.len(),
                };
                (next, report)
            }
        };

        self.commit(next)?;
        Ok(report)
    }

    /// Write the full list to a backup file.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        transfer::write_backup(path, &self.sessions)
    }

    /// Persist a candidate list, committing to memory only on success.
    fn commit(&mut self, next: Vec<Session>) -> StorageResult<()> {
        self.store.save_all(&next)?;
        self.sessions = next;
        Ok(())
    }

    // ==================== Views ====================

    pub fn totals(&self) -> Totals {
        stats::totals(&self.sessions)
    }

    pub fn by_day(&self) -> Vec<DayBucket> {
        stats::by_day(&self.sessions)
    }

    pub fn by_book(&self) -> Vec<BookSummary> {
        stats::by_book(&self.sessions)
    }

    pub fn monthly(&self, year: i32, month: u32) -> Vec<Session> {
        stats::monthly_filter(&self.sessions, year, month)
    }
}
