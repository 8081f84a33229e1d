//! pagelog CLI
//!
//! Command-line interface for pagelog - a local-first reading-session
//! tracker.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pagelog_core::Tracker;

mod commands;
mod output;
mod prompt;

use commands::session::LogArgs;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "pagelog")]
#[command(about = "pagelog - track your reading sessions")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a reading session
    #[command(alias = "add")]
    Log(LogArgs),
    /// List sessions
    #[command(alias = "ls")]
    List {
        /// Only this calendar month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Only this book
        #[arg(short, long)]
        book: Option<String>,
    },
    /// Show one session in full
    Show {
        /// Session ID (full or prefix)
        id: String,
    },
    /// Edit the notes on a session
    Note {
        /// Session ID (full or prefix)
        id: String,
        /// New notes text (blank clears)
        text: String,
    },
    /// Delete a session
    #[command(alias = "rm")]
    Delete {
        /// Session ID (full or prefix)
        id: String,
    },
    /// Show reading totals
    Stats {
        /// Only this calendar month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show per-book statistics
    Books,
    /// Show the per-day activity calendar
    Heatmap {
        /// Only this calendar month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Export all sessions to a backup file
    Export {
        /// Output file (defaults to reading-tracker-backup-<date>.json)
        path: Option<std::path::PathBuf>,
    },
    /// Import sessions from a backup file
    Import {
        /// Backup file to read
        path: std::path::PathBuf,
        /// Overwrite everything instead of merging
        #[arg(long)]
        replace: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all sessions
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Load generated sample data (replaces existing sessions)
    Sample {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show data location and a totals snapshot
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config doesn't need the session list
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let mut tracker = Tracker::open()?;

    match cli.command {
        Commands::Log(args) => commands::session::log(&mut tracker, args, &output),
        Commands::List { month, book } => commands::session::list(&tracker, month, book, &output),
        Commands::Show { id } => commands::session::show(&tracker, id, &output),
        Commands::Note { id, text } => commands::session::note(&mut tracker, id, text, &output),
        Commands::Delete { id } => commands::session::delete(&mut tracker, id, &output),
        Commands::Stats { month } => commands::stats::totals(&tracker, month, &output),
        Commands::Books => commands::stats::books(&tracker, &output),
        Commands::Heatmap { month } => commands::heatmap::show(&tracker, month, &output),
        Commands::Export { path } => commands::transfer::export(&tracker, path, &output),
        Commands::Import { path, replace, yes } => {
            commands::transfer::import(&mut tracker, path, replace, yes, &output)
        }
        Commands::Clear { yes } => commands::transfer::clear(&mut tracker, yes, &output),
        Commands::Sample { yes } => commands::transfer::load_sample(&mut tracker, yes, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&tracker, &output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
