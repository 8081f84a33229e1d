//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use pagelog_core::{stats, BookSummary, DayBucket, ImportReport, Session, Totals};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a list of sessions
    pub fn print_sessions(&self, sessions: &[Session]) {
        match self.format {
            OutputFormat::Human => {
                if sessions.is_empty() {
                    println!("No sessions found.");
                    return;
                }
                for session in sessions {
                    let id = session.id.as_deref().unwrap_or("--------");
                    let notes_indicator = if session.notes.is_some() { " *" } else { "" };
                    println!(
                        "{} | {} | {} | {:>4}p | {:>6} | {}{}",
                        short_id(id),
                        session.date,
                        format_speed(session.pages_per_min),
                        session.pages.unwrap_or(0),
                        format_duration(session.duration_min.unwrap_or(0.0)),
                        truncate(session.book_label(), 30),
                        notes_indicator
                    );
                }
                println!("\n{} session(s)", sessions.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(sessions).unwrap());
            }
            OutputFormat::Quiet => {
                for session in sessions {
                    if let Some(ref id) = session.id {
                        println!("{}", id);
                    }
                }
            }
        }
    }

    /// Print a single session in full
    pub fn print_session(&self, session: &Session) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", session.id.as_deref().unwrap_or("(none)"));
                println!("Date:     {}", session.date);
                println!("Book:     {}", session.book_label());
                println!("Pages:    {}", session.pages.unwrap_or(0));
                if let (Some(start), Some(end)) = (session.start_page, session.end_page) {
                    println!("Range:    p.{} - p.{}", start, end);
                }
                println!(
                    "Duration: {}",
                    format_duration(session.duration_min.unwrap_or(0.0))
                );
                println!("Speed:    {}", format_speed(session.pages_per_min));
                if let Some(ref notes) = session.notes {
                    println!();
                    println!("{}", notes);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(session).unwrap());
            }
            OutputFormat::Quiet => {
                if let Some(ref id) = session.id {
                    println!("{}", id);
                }
            }
        }
    }

    /// Print the totals dashboard
    pub fn print_totals(&self, totals: &Totals) {
        match self.format {
            OutputFormat::Human => {
                println!("Total pages:   {}", totals.total_pages);
                println!("Total time:    {}", format_duration(totals.total_minutes));
                println!("Sessions:      {}", totals.session_count);
                println!("Speed:         {} pages/min", totals.avg_pages_per_min);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(totals).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", totals.total_pages);
            }
        }
    }

    /// Print per-book summaries
    pub fn print_books(&self, books: &[BookSummary]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No sessions found.");
                    return;
                }
                for book in books {
                    println!(
                        "{:<30} {:>5}p  {:>7}  {:>2} session(s)  {} p/min  {} p/session",
                        truncate(&book.book, 30),
                        book.pages,
                        format_duration(book.minutes),
                        book.sessions,
                        book.pages_per_min,
                        book.pages_per_session
                    );
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(books).unwrap());
            }
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.book);
                }
            }
        }
    }

    /// Print the per-day activity calendar
    pub fn print_heatmap(&self, days: &[DayBucket]) {
        match self.format {
            OutputFormat::Human => {
                if days.is_empty() {
                    println!("No activity recorded.");
                    return;
                }
                for day in days {
                    let level = stats::heatmap_level(day.pages, day.minutes);
                    println!(
                        "{} {:<5} {:>4}p {:>7} ({} session(s))",
                        day.date,
                        "\u{25ae}".repeat(level as usize),
                        day.pages,
                        format_duration(day.minutes),
                        day.sessions
                    );
                }
            }
            OutputFormat::Json => {
                let json_days: Vec<_> = days
                    .iter()
                    .map(|day| {
                        serde_json::json!({
                            "date": day.date,
                            "pages": day.pages,
                            "minutes": day.minutes,
                            "sessions": day.sessions,
                            "level": stats::heatmap_level(day.pages, day.minutes),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json_days).unwrap());
            }
            OutputFormat::Quiet => {
                for day in days {
                    println!("{}", day.date);
                }
            }
        }
    }

    /// Print the result of an import
    pub fn print_import_report(&self, report: &ImportReport) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "Imported {} new session(s), skipped {} duplicate(s). {} total.",
                    report.added_count, report.duplicate_count, report.total_count
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", report.added_count);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Format minutes as "2h 15m" / "45m"
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.round() as i64;
    let h = total / 60;
    let m = total % 60;
    if h > 0 {
        format!("{}h {}m", h, m)
    } else {
        format!("{}m", m)
    }
}

/// Format a stored reading speed; absent means "no duration recorded"
fn format_speed(pages_per_min: Option<f64>) -> String {
    match pages_per_min {
        Some(speed) => format!("{:>5} p/m", speed),
        None => "    - p/m".to_string(),
    }
}

/// First eight characters of an id, for compact display. Imported ids
/// are opaque strings, so cut on a char boundary and never assume length.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max length in chars, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
