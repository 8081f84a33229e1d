//! Sample data generation
//!
//! Produces a couple of months of plausible reading history so a new
//! user can see the dashboards populated before logging anything real.
//! The output is deterministic for a given anchor date, which keeps
//! demo runs and tests reproducible.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{derive_pages_per_min, Session, DATE_FORMAT};

const BOOKS: [&str; 4] = ["Dune", "The Left Hand of Darkness", "Emma", "Foundation"];

/// Generate roughly two months of sessions ending at `today`,
/// skipping some days, newest first.
pub fn generate_sample_data(today: NaiveDate) -> Vec<Session> {
    let mut sessions = Vec::new();

    for days_ago in 0..60i64 {
        // Skip about a third of the days so the heatmap has gaps.
        if (days_ago * 7 + 3) % 10 < 3 {
            continue;
        }

        let date = today - Duration::days(days_ago);
        let start_hour = 10 + (days_ago % 10) as u32;
        let duration = 15 + (days_ago * 37) % 90;
        let pages = duration / 2 + (days_ago * 13) % 30;

        let start = Utc
            .from_utc_datetime(&date.and_hms_opt(start_hour, 0, 0).expect("valid time"));
        let end = start + Duration::minutes(duration);

        sessions.push(Session {
            id: Some(Uuid::new_v4().to_string()),
            date: date.format(DATE_FORMAT).to_string(),
            start: Some(start.to_rfc3339()),
            end: Some(end.to_rfc3339()),
            duration_min: Some(duration as f64),
            pages: Some(pages),
            start_page: None,
            end_page: None,
            pages_per_min: derive_pages_per_min(Some(pages), Some(duration as f64)),
            book: Some(BOOKS[(days_ago % BOOKS.len() as i64) as usize].to_string()),
            notes: if days_ago % 5 == 0 {
                Some("Good session.".to_string())
            } else {
                None
            },
        });
    }

    sessions
}
