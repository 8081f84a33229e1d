//! Data models for pagelog
//!
//! Defines the `Session` record (one logged reading event) and the
//! validated construction path (`SessionDraft`).
//!
//! The persisted field names (`duration_min`, `startPage`, `endPage`,
//! `pagesPerMin`) are the wire format shared with export/import files
//! and must not change.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Grouping key used when a session has no (or a blank) book label.
pub const UNTITLED_BOOK: &str = "untitled";

/// Date format used for the `date` field (calendar-day bucketing key).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One logged reading event.
///
/// Numeric fields are optional: imported files from older versions (or
/// other tools) may omit any of them, and aggregation treats missing
/// values as zero contributions. `date` is kept as a plain string so a
/// record with a malformed date still deserializes; day-bucketing
/// skips it instead of failing the whole import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier, assigned at creation. May be absent in
    /// imported data, in which case dedup falls back to content match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Calendar day (YYYY-MM-DD), the bucketing key for all
    /// day/month aggregation.
    pub date: String,
    /// Session start timestamp (RFC 3339), used for chronological sort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Session end timestamp (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Minutes spent reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    /// Pages read in this session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    /// Absolute page the session started on.
    #[serde(rename = "startPage", default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<i64>,
    /// Absolute page the session ended on.
    #[serde(rename = "endPage", default, skip_serializing_if = "Option::is_none")]
    pub end_page: Option<i64>,
    /// Reading speed computed at save time. The stored value is
    /// authoritative: older records may have been saved under
    /// different rounding rules, so it is never recomputed on read.
    #[serde(rename = "pagesPerMin", default, skip_serializing_if = "Option::is_none")]
    pub pages_per_min: Option<f64>,
    /// Book label; the grouping key for per-book statistics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<String>,
    /// Free-text notes. The only field editable after creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Session {
    /// Book label normalized for grouping: blank or absent maps to
    /// [`UNTITLED_BOOK`].
    pub fn book_label(&self) -> &str {
        match self.book.as_deref().map(str::trim) {
            Some("") | None => UNTITLED_BOOK,
            Some(b) => b,
        }
    }

    /// Parse the `date` field as a calendar day.
    ///
    /// Returns `None` for malformed dates; callers exclude such
    /// records from day bucketing rather than erroring.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Update the notes. Blank input clears them.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
    }
}

/// Errors rejected at the input boundary, before a record exists.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("pages must be a non-negative number, got {0}")]
    NegativePages(i64),

    #[error("duration must be a non-negative number of minutes, got {0}")]
    NegativeDuration(f64),

    #[error("end page ({end}) must be greater than start page ({start})")]
    PageRange { start: i64, end: i64 },

    #[error("pages ({pages}) does not match the page range ({span} pages from {start} to {end})")]
    PageCountMismatch {
        pages: i64,
        span: i64,
        start: i64,
        end: i64,
    },

    #[error("session end timestamp is before its start")]
    EndBeforeStart,
}

/// Unvalidated input for a new session.
///
/// `build` is the only way to obtain a persisted-shape [`Session`]
/// from user input; no partial record is ever created on failure.
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    pub book: Option<String>,
    pub date: Option<NaiveDate>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub duration_min: Option<f64>,
    pub pages: Option<i64>,
    pub start_page: Option<i64>,
    pub end_page: Option<i64>,
    pub notes: Option<String>,
}

impl SessionDraft {
    /// Validate the draft and construct a session.
    ///
    /// - assigns a fresh id
    /// - defaults `date` to today (or the start timestamp's day)
    /// - derives `duration_min` from `start`/`end` when absent
    /// - derives `pages` from the page markers when absent
    /// - computes `pagesPerMin` once, at save time
    pub fn build(self) -> Result<Session, ValidationError> {
        if let Some(p) = self.pages {
            if p < 0 {
                return Err(ValidationError::NegativePages(p));
            }
        }
        if let Some(d) = self.duration_min {
            if d < 0.0 {
                return Err(ValidationError::NegativeDuration(d));
            }
        }

        let span = match (self.start_page, self.end_page) {
            (Some(start), Some(end)) => {
                if end <= start {
                    return Err(ValidationError::PageRange { start, end });
                }
                Some(end - start)
            }
            _ => None,
        };

        let pages = match (self.pages, span) {
            (Some(pages), Some(span)) if pages != span => {
                // Both given and disagreeing is an input mistake, not
                // something to silently reconcile.
                return Err(ValidationError::PageCountMismatch {
                    pages,
                    span,
                    start: self.start_page.unwrap_or(0),
                    end: self.end_page.unwrap_or(0),
                });
            }
            (Some(pages), _) => Some(pages),
            (None, span) => span,
        };

        let duration_min = match self.duration_min {
            Some(d) => Some(d),
            None => match (self.start, self.end) {
                (Some(start), Some(end)) => {
                    let minutes = calculate_duration(start, end);
                    if minutes < 0.0 {
                        return Err(ValidationError::EndBeforeStart);
                    }
                    Some(minutes)
                }
                _ => None,
            },
        };

        let date = self
            .date
            .or_else(|| self.start.map(|s| s.with_timezone(&Local).date_naive()))
            .unwrap_or_else(|| Local::now().date_naive());

        let book = self
            .book
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());
        let notes = self.notes.filter(|n| !n.trim().is_empty());

        Ok(Session {
            id: Some(Uuid::new_v4().to_string()),
            date: date.format(DATE_FORMAT).to_string(),
            start: self.start.map(|t| t.to_rfc3339()),
            end: self.end.map(|t| t.to_rfc3339()),
            pages_per_min: derive_pages_per_min(pages, duration_min),
            duration_min,
            pages,
            start_page: self.start_page,
            end_page: self.end_page,
            book,
            notes,
        })
    }
}

/// Whole minutes between two timestamps.
pub fn calculate_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_minutes() as f64
}

/// Reading speed: `pages / duration_min` rounded to 2 decimals.
///
/// Defined only when `duration_min > 0`; otherwise `None`, never zero
/// (zero would read as infinitely slow). Missing pages count as zero.
pub fn derive_pages_per_min(pages: Option<i64>, duration_min: Option<f64>) -> Option<f64> {
    let minutes = duration_min.unwrap_or(0.0);
    if minutes <= 0.0 {
        return None;
    }
    let pages = pages.unwrap_or(0).max(0) as f64;
    Some((pages / minutes * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_derive_pages_per_min() {
        assert_eq!(derive_pages_per_min(Some(10), Some(20.0)), Some(0.5));
        assert_eq!(derive_pages_per_min(Some(10), Some(3.0)), Some(3.33));
        assert_eq!(derive_pages_per_min(None, Some(30.0)), Some(0.0));
    }

    #[test]
    fn test_pages_per_min_undefined_without_duration() {
        // Zero or missing duration must yield None, not 0 or NaN.
        assert_eq!(derive_pages_per_min(Some(15), Some(0.0)), None);
        assert_eq!(derive_pages_per_min(Some(15), None), None);
    }

    #[test]
    fn test_build_minimal_session() {
        let session = SessionDraft {
            book: Some("Dune".to_string()),
            pages: Some(20),
            duration_min: Some(30.0),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert!(session.id.is_some());
        assert_eq!(session.pages, Some(20));
        assert_eq!(session.pages_per_min, Some(0.67));
        assert_eq!(session.book_label(), "Dune");
        assert!(session.parsed_date().is_some());
    }

    #[test]
    fn test_build_zero_duration_has_no_speed() {
        let session = SessionDraft {
            pages: Some(15),
            duration_min: Some(0.0),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert_eq!(session.pages_per_min, None);
    }

    #[test]
    fn test_build_derives_pages_from_markers() {
        let session = SessionDraft {
            start_page: Some(1),
            end_page: Some(21),
            duration_min: Some(30.0),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert_eq!(session.pages, Some(20));
    }

    #[test]
    fn test_build_rejects_inverted_page_range() {
        let err = SessionDraft {
            start_page: Some(50),
            end_page: Some(40),
            ..Default::default()
        }
        .build()
        .unwrap_err();

        assert_eq!(err, ValidationError::PageRange { start: 50, end: 40 });
    }

    #[test]
    fn test_build_rejects_page_count_mismatch() {
        let err = SessionDraft {
            pages: Some(5),
            start_page: Some(1),
            end_page: Some(21),
            ..Default::default()
        }
        .build()
        .unwrap_err();

        assert!(matches!(err, ValidationError::PageCountMismatch { .. }));
    }

    #[test]
    fn test_build_rejects_negative_input() {
        assert_eq!(
            SessionDraft {
                pages: Some(-3),
                ..Default::default()
            }
            .build()
            .unwrap_err(),
            ValidationError::NegativePages(-3)
        );
        assert_eq!(
            SessionDraft {
                duration_min: Some(-1.0),
                ..Default::default()
            }
            .build()
            .unwrap_err(),
            ValidationError::NegativeDuration(-1.0)
        );
    }

    #[test]
    fn test_build_derives_duration_from_timestamps() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 10, 45, 0).unwrap();

        let session = SessionDraft {
            start: Some(start),
            end: Some(end),
            pages: Some(30),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert_eq!(session.duration_min, Some(45.0));
        assert_eq!(session.pages_per_min, Some(0.67));
    }

    #[test]
    fn test_build_rejects_end_before_start() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let err = SessionDraft {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
        .build()
        .unwrap_err();

        assert_eq!(err, ValidationError::EndBeforeStart);
    }

    #[test]
    fn test_book_label_normalization() {
        let mut session = SessionDraft::default().build().unwrap();
        assert_eq!(session.book_label(), UNTITLED_BOOK);

        session.book = Some("   ".to_string());
        assert_eq!(session.book_label(), UNTITLED_BOOK);

        session.book = Some("  Dune ".to_string());
        assert_eq!(session.book_label(), "Dune");
    }

    #[test]
    fn test_set_notes() {
        let mut session = SessionDraft::default().build().unwrap();
        session.set_notes("great chapter");
        assert_eq!(session.notes.as_deref(), Some("great chapter"));

        session.set_notes("  ");
        assert!(session.notes.is_none());
    }

    #[test]
    fn test_parsed_date_tolerates_garbage() {
        let mut session = SessionDraft::default().build().unwrap();
        session.date = "not-a-date".to_string();
        assert!(session.parsed_date().is_none());
    }

    #[test]
    fn test_session_serialization_field_names() {
        let session = SessionDraft {
            book: Some("Dune".to_string()),
            pages: Some(20),
            start_page: Some(1),
            end_page: Some(21),
            duration_min: Some(30.0),
            ..Default::default()
        }
        .build()
        .unwrap();

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"startPage\""));
        assert!(json.contains("\"endPage\""));
        assert!(json.contains("\"pagesPerMin\""));
        assert!(json.contains("\"duration_min\""));

        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_deserialize_sparse_record() {
        // Records from other tools may carry only a date.
        let session: Session = serde_json::from_str(r#"{"date":"2024-01-01"}"#).unwrap();
        assert!(session.id.is_none());
        assert!(session.pages.is_none());
        assert_eq!(session.book_label(), UNTITLED_BOOK);
    }
}
