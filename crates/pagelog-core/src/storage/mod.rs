//! Storage layer
//!
//! Persists the full session list as one JSON array on disk. There is
//! no incremental update path: every save writes the whole collection
//! atomically, and last write wins.

pub mod error;
pub mod json_store;

pub use error::{StorageError, StorageResult};
pub use json_store::{JsonFileStore, SessionStore};
