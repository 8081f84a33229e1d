//! Aggregation engine
//!
//! Pure functions turning a session list into summary views: global
//! totals, per-day buckets (heatmap input), per-book summaries, and
//! monthly-filtered subsets.
//!
//! Views are recomputed from the full list on every call rather than
//! incrementally maintained; everything here is O(n) and cheap at
//! personal-tracker scale. All functions are total: malformed dates
//! and negative numbers are data-quality anomalies that get a warning
//! and a graceful degradation, never an error.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::models::Session;

/// Global totals across a session list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_pages: i64,
    pub total_minutes: f64,
    pub session_count: usize,
    /// Weighted average speed: total pages over sessions with both
    /// pages > 0 and duration > 0, divided by total minutes over that
    /// same subset. Not the mean of per-session rates. Rounded to 1
    /// decimal for display.
    pub avg_pages_per_min: f64,
}

/// One calendar day's activity. Days with no sessions are absent from
/// the output; heatmap rendering treats absent days as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub pages: i64,
    pub minutes: f64,
    pub sessions: usize,
}

/// Per-book summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub book: String,
    pub pages: i64,
    pub minutes: f64,
    pub sessions: usize,
    /// Weighted average, same rule as [`Totals::avg_pages_per_min`].
    pub pages_per_min: f64,
    pub pages_per_session: f64,
}

/// Sum pages and minutes across all sessions.
///
/// Missing values contribute zero. Negative values (possible in
/// imported data) also contribute zero, with a warning.
pub fn totals(sessions: &[Session]) -> Totals {
    let mut total_pages = 0i64;
    let mut total_minutes = 0.0f64;
    let mut weighted_pages = 0i64;
    let mut weighted_minutes = 0.0f64;

    for session in sessions {
        let pages = pages_of(session);
        let minutes = minutes_of(session);
        total_pages += pages;
        total_minutes += minutes;
        if pages > 0 && minutes > 0.0 {
            weighted_pages += pages;
            weighted_minutes += minutes;
        }
    }

    Totals {
        total_pages,
        total_minutes,
        session_count: sessions.len(),
        avg_pages_per_min: weighted_average(weighted_pages, weighted_minutes),
    }
}

/// Sessions whose `date` falls within the given calendar month.
///
/// Compared by calendar-month equality, not a 30-day window. Sessions
/// with unparsable dates are excluded.
pub fn monthly_filter(sessions: &[Session], year: i32, month: u32) -> Vec<Session> {
    sessions
        .iter()
        .filter(|s| {
            s.parsed_date()
                .is_some_and(|d| d.year() == year && d.month() == month)
        })
        .cloned()
        .collect()
}

/// Group sessions by calendar day, ascending by date.
///
/// Groups on the `date` field exactly, not the `start` timestamp.
/// Sessions with unparsable dates are excluded from bucketing (they
/// still count toward [`totals`]).
pub fn by_day(sessions: &[Session]) -> Vec<DayBucket> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for session in sessions {
        let Some(date) = session.parsed_date() else {
            warn!(date = %session.date, "skipping session with unparsable date");
            continue;
        };
        let bucket = buckets.entry(date).or_insert_with(|| DayBucket {
            date,
            pages: 0,
            minutes: 0.0,
            sessions: 0,
        });
        bucket.pages += pages_of(session);
        bucket.minutes += minutes_of(session);
        bucket.sessions += 1;
    }

    buckets.into_values().collect()
}

/// Group sessions by book, sorted descending by pages read.
///
/// Blank or absent book labels group under [`crate::models::UNTITLED_BOOK`].
/// Ties break on the book name so the ordering is deterministic.
pub fn by_book(sessions: &[Session]) -> Vec<BookSummary> {
    struct Acc {
        pages: i64,
        minutes: f64,
        sessions: usize,
        weighted_pages: i64,
        weighted_minutes: f64,
    }

    let mut groups: HashMap<String, Acc> = HashMap::new();

    for session in sessions {
        let acc = groups
            .entry(session.book_label().to_string())
            .or_insert(Acc {
                pages: 0,
                minutes: 0.0,
                sessions: 0,
                weighted_pages: 0,
                weighted_minutes: 0.0,
            });
        let pages = pages_of(session);
        let minutes = minutes_of(session);
        acc.pages += pages;
        acc.minutes += minutes;
        acc.sessions += 1;
        if pages > 0 && minutes > 0.0 {
            acc.weighted_pages += pages;
            acc.weighted_minutes += minutes;
        }
    }

    let mut books: Vec<BookSummary> = groups
        .into_iter()
        .map(|(book, acc)| BookSummary {
            book,
            pages: acc.pages,
            minutes: acc.minutes,
            sessions: acc.sessions,
            pages_per_min: weighted_average(acc.weighted_pages, acc.weighted_minutes),
            pages_per_session: round1(acc.pages as f64 / acc.sessions.max(1) as f64),
        })
        .collect();

    books.sort_by(|a, b| b.pages.cmp(&a.pages).then_with(|| a.book.cmp(&b.book)));
    books
}

/// Activity level 0-5 for heatmap rendering.
///
/// Level 0 is reserved for no activity. Pages drive the level when a
/// day has any; otherwise minutes do, on a separate ladder. The
/// breakpoints are fixed:
///
/// | level |  pages  | minutes |
/// |-------|---------|---------|
/// |   1   |  < 10   |  < 15   |
/// |   2   |  < 25   |  < 30   |
/// |   3   |  < 50   |  < 60   |
/// |   4   |  < 100  |  < 120  |
/// |   5   |  >= 100 |  >= 120 |
pub fn heatmap_level(pages: i64, minutes: f64) -> u8 {
    const PAGE_STEPS: [f64; 4] = [10.0, 25.0, 50.0, 100.0];
    const MINUTE_STEPS: [f64; 4] = [15.0, 30.0, 60.0, 120.0];

    if pages > 0 {
        step_level(pages as f64, &PAGE_STEPS)
    } else if minutes > 0.0 {
        step_level(minutes, &MINUTE_STEPS)
    } else {
        0
    }
}

fn step_level(value: f64, steps: &[f64; 4]) -> u8 {
    for (i, step) in steps.iter().enumerate() {
        if value < *step {
            return (i + 1) as u8;
        }
    }
    5
}

fn pages_of(session: &Session) -> i64 {
    match session.pages {
        Some(p) if p < 0 => {
            warn!(pages = p, "negative page count treated as zero");
            0
        }
        Some(p) => p,
        None => 0,
    }
}

fn minutes_of(session: &Session) -> f64 {
    match session.duration_min {
        Some(m) if m < 0.0 => {
            warn!(minutes = m, "negative duration treated as zero");
            0.0
        }
        Some(m) => m,
        None => 0.0,
    }
}

fn weighted_average(pages: i64, minutes: f64) -> f64 {
    if minutes > 0.0 {
        round1(pages as f64 / minutes)
    } else {
        0.0
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
