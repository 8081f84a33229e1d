//! Session command handlers
//!
//! Logging, listing, note editing, and deletion of reading sessions.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;

use pagelog_core::{JsonFileStore, SessionDraft, Tracker};

use crate::commands::{parse_month, storage_err};
use crate::output::{format_duration, short_id, Output};
use crate::prompt::confirm;

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Book title
    #[arg(short, long)]
    pub book: Option<String>,

    /// Pages read
    #[arg(short, long)]
    pub pages: Option<i64>,

    /// Minutes spent
    #[arg(short, long)]
    pub minutes: Option<f64>,

    /// Session day (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Page the session started on
    #[arg(long)]
    pub start_page: Option<i64>,

    /// Page the session ended on
    #[arg(long)]
    pub end_page: Option<i64>,

    /// Free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Record a new reading session
pub fn log(tracker: &mut Tracker<JsonFileStore>, args: LogArgs, output: &Output) -> Result<()> {
    if args.pages.is_none() && args.start_page.is_none() && args.minutes.is_none() {
        bail!("Nothing to log. Provide --pages, --minutes, or a page range.");
    }

    let session = SessionDraft {
        book: args.book,
        date: args.date,
        duration_min: args.minutes,
        pages: args.pages,
        start_page: args.start_page,
        end_page: args.end_page,
        notes: args.notes,
        ..Default::default()
    }
    .build()?;

    let id = session.id.clone().unwrap_or_default();
    let date = session.date.clone();
    tracker.add(session).map_err(storage_err)?;

    output.success(&format!("Logged session {} on {}", short_id(&id), date));
    Ok(())
}

/// List sessions, optionally filtered by month and book
pub fn list(
    tracker: &Tracker<JsonFileStore>,
    month: Option<String>,
    book: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut sessions = match month {
        Some(m) => {
            let (year, month) = parse_month(&m)?;
            tracker.monthly(year, month)
        }
        None => tracker.sessions().to_vec(),
    };

    if let Some(ref book) = book {
        sessions.retain(|s| s.book_label().eq_ignore_ascii_case(book));
    }

    // Chronological: date buckets first, start timestamp within a day.
    sessions.sort_by(|a, b| (&a.date, &a.start).cmp(&(&b.date, &b.start)));

    output.print_sessions(&sessions);
    Ok(())
}

/// Show one session in full
pub fn show(tracker: &Tracker<JsonFileStore>, id: String, output: &Output) -> Result<()> {
    let session = tracker.find(&id)?;
    output.print_session(session);
    Ok(())
}

/// Edit the notes on a session (the only post-hoc edit there is)
pub fn note(
    tracker: &mut Tracker<JsonFileStore>,
    id: String,
    text: String,
    output: &Output,
) -> Result<()> {
    let full_id = tracker
        .find(&id)?
        .id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Session has no id and cannot be edited by id"))?;

    tracker
        .update_notes(&full_id, &text)
        .map_err(storage_err)
        .context("Failed to update notes")?;

    output.success(&format!("Updated notes on {}", short_id(&full_id)));
    Ok(())
}

/// Delete a session
pub fn delete(tracker: &mut Tracker<JsonFileStore>, id: String, output: &Output) -> Result<()> {
    let session = tracker.find(&id)?;
    let full_id = session
        .id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Session has no id and cannot be deleted by id"))?;

    if output.should_prompt() {
        println!(
            "Delete session: {} | {} | {}p | {}",
            short_id(&full_id),
            session.date,
            session.pages.unwrap_or(0),
            format_duration(session.duration_min.unwrap_or(0.0)),
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    tracker.delete(&full_id).map_err(storage_err)?;
    output.success(&format!("Deleted session: {}", short_id(&full_id)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use pagelog_core::{Config, ImportMode, Session};
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn open_tracker(temp_dir: &TempDir) -> Tracker<JsonFileStore> {
        Tracker::open_with_config(Config {
            data_dir: temp_dir.path().to_path_buf(),
        })
        .unwrap()
    }

    fn imported_session(id: &str) -> Session {
        let json = format!(r#"{{"id":"{}","date":"2026-01-05","pages":10}}"#, id);
        serde_json::from_str(&json).unwrap()
    }

    // Imported ids are opaque and may be shorter than the eight chars
    // we display for locally generated uuids.
    #[test]
    fn test_note_accepts_short_imported_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = open_tracker(&temp_dir);
        tracker
            .import(vec![imported_session("ab")], ImportMode::Replace)
            .unwrap();

        note(&mut tracker, "ab".to_string(), "from backup".to_string(), &quiet()).unwrap();
        assert_eq!(tracker.sessions()[0].notes.as_deref(), Some("from backup"));
    }

    #[test]
    fn test_delete_accepts_short_imported_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = open_tracker(&temp_dir);
        tracker
            .import(vec![imported_session("ab")], ImportMode::Replace)
            .unwrap();

        delete(&mut tracker, "ab".to_string(), &quiet()).unwrap();
        assert_eq!(tracker.session_count(), 0);
    }

    #[test]
    fn test_show_reports_ambiguous_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = open_tracker(&temp_dir);
        tracker
            .import(
                vec![imported_session("abc-1111"), imported_session("abc-2222")],
                ImportMode::Replace,
            )
            .unwrap();

        let err = show(&tracker, "abc".to_string(), &quiet()).unwrap_err();
        assert!(err.to_string().contains("matches 2 sessions"));
    }
}
