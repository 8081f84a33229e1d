//! pagelog Core Library
//!
//! Core functionality for pagelog, a local-first reading-session
//! tracker: the session record model, aggregation into dashboards and
//! heatmap buckets, merge/dedup for imports, and JSON-file
//! persistence.
//!
//! # Architecture
//!
//! The session list is a flat JSON array on disk, loaded whole into
//! memory and owned by a single [`Tracker`]. The aggregation
//! ([`stats`]) and merge ([`merge`]) engines are pure functions over
//! that list; every view is recomputed from scratch on demand, which
//! is cheap at personal-tracker scale and keeps the state model
//! trivially single-threaded.
//!
//! # Quick Start
//!
//! ```text
//! let mut tracker = Tracker::open()?;
//!
//! // Log a session
//! let session = SessionDraft {
//!     book: Some("Dune".into()),
//!     pages: Some(20),
//!     duration_min: Some(30.0),
//!     ..Default::default()
//! }
//! .build()?;
//! tracker.add(session)?;
//!
//! // Query views
//! let totals = tracker.totals();
//! let books = tracker.by_book();
//! ```
//!
//! # Modules
//!
//! - `tracker`: owned application state (main entry point)
//! - `models`: the session record and validated construction
//! - `stats`: aggregation engine (totals, per-day, per-book, heatmap)
//! - `merge`: merge/dedup engine for imports
//! - `storage`: JSON-file persistence gateway
//! - `transfer`: backup export/import files
//! - `sample`: demo data generation
//! - `config`: application configuration

pub mod config;
pub mod merge;
pub mod models;
pub mod sample;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod transfer;

pub use config::Config;
pub use merge::MergeOutcome;
pub use models::{Session, SessionDraft, ValidationError, UNTITLED_BOOK};
pub use stats::{BookSummary, DayBucket, Totals};
pub use storage::{JsonFileStore, SessionStore, StorageError};
pub use tracker::{FindError, ImportMode, ImportReport, Tracker};
pub use transfer::ImportError;
