//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{book, stats_cmd};
use crate::domain::{FilterOption, Shelf, SortOrder};
use crate::storage::FileStore;
use crate::tracker::Tracker;

#[derive(Parser)]
#[command(name = "starbooks")]
#[command(author, version, about = "Local-first reading tracker")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "STARBOOKS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a book to the wishlist
    Add {
        /// Book title
        title: String,

        /// Book author
        author: String,

        /// Reader notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List books on a shelf (or all shelves)
    List {
        /// Shelf to list (omit for all shelves)
        shelf: Option<Shelf>,

        /// Rating filter
        #[arg(long, default_value = "all")]
        filter: FilterOption,
    },

    /// Show book details
    Show {
        /// Book ID (or unique prefix)
        id: String,
    },

    /// Edit a book's title, author, or notes
    Edit {
        /// Book ID (or unique prefix)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New author
        #[arg(long)]
        author: Option<String>,

        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Start reading a wishlist book (moves it to the hangar)
    Start {
        /// Book ID (or unique prefix)
        id: String,
    },

    /// Finish the book you're reading (moves it to the archive)
    Finish {
        /// Book ID (or unique prefix)
        id: String,
    },

    /// Put an in-progress book back on the wishlist
    Abandon {
        /// Book ID (or unique prefix)
        id: String,
    },

    /// Mark a wishlist book as already read (archives it unrated)
    Read {
        /// Book ID (or unique prefix)
        id: String,
    },

    /// Move an archived book back to the wishlist
    Unread {
        /// Book ID (or unique prefix)
        id: String,
    },

    /// Re-read an archived book (moves it to the hangar)
    Reread {
        /// Book ID (or unique prefix)
        id: String,
    },

    /// Rate a book 0-5 stars (out-of-range values are clamped)
    Rate {
        /// Book ID (or unique prefix)
        id: String,

        /// Star rating
        rating: i64,
    },

    /// Delete books from a shelf
    Delete {
        /// Shelf to delete from
        shelf: Shelf,

        /// Book IDs (or unique prefixes)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Move books to a new position within a shelf's displayed view
    Reorder {
        /// Shelf to reorder
        shelf: Shelf,

        /// View positions of the books to move (0-based, comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        from: Vec<usize>,

        /// View position to move them before
        #[arg(long)]
        to: usize,
    },

    /// Show or set a shelf's sort order
    Sort {
        /// Shelf to configure
        shelf: Shelf,

        /// New sort order (omit to show the current one)
        order: Option<SortOrder>,
    },

    /// Set the yearly reading goal (0 clears it)
    Goal {
        /// Books per year
        goal: u32,
    },

    /// Show reading statistics
    Stats,

    /// List achievements and their earned state
    Achievements,
}

fn open_tracker(data_dir: Option<PathBuf>) -> Result<Tracker> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileStore::default_dir().context("Could not determine a data directory")?,
    };
    let store = FileStore::open(dir)?;
    Ok(Tracker::open(Box::new(store)))
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let mut tracker = open_tracker(cli.data_dir)?;

    match cli.command {
        Commands::Add { title, author, notes } => {
            book::add(&mut tracker, &output, &title, &author, notes.as_deref())?
        }
        Commands::List { shelf, filter } => book::list(&tracker, &output, shelf, filter)?,
        Commands::Show { id } => book::show(&tracker, &output, &id)?,
        Commands::Edit { id, title, author, notes } => {
            book::edit(&mut tracker, &output, &id, title, author, notes)?
        }

        Commands::Start { id } => book::transition(
            &mut tracker,
            &output,
            &id,
            Shelf::Wishlist,
            Shelf::Hangar,
            "Started reading",
        )?,
        Commands::Finish { id } => book::transition(
            &mut tracker,
            &output,
            &id,
            Shelf::Hangar,
            Shelf::Archive,
            "Finished",
        )?,
        Commands::Abandon { id } => book::transition(
            &mut tracker,
            &output,
            &id,
            Shelf::Hangar,
            Shelf::Wishlist,
            "Shelved",
        )?,
        Commands::Read { id } => book::transition(
            &mut tracker,
            &output,
            &id,
            Shelf::Wishlist,
            Shelf::Archive,
            "Archived",
        )?,
        Commands::Unread { id } => book::transition(
            &mut tracker,
            &output,
            &id,
            Shelf::Archive,
            Shelf::Wishlist,
            "Back on the wishlist:",
        )?,
        Commands::Reread { id } => book::transition(
            &mut tracker,
            &output,
            &id,
            Shelf::Archive,
            Shelf::Hangar,
            "Re-reading",
        )?,

        Commands::Rate { id, rating } => book::rate(&mut tracker, &output, &id, rating)?,
        Commands::Delete { shelf, ids } => book::delete(&mut tracker, &output, shelf, &ids)?,
        Commands::Reorder { shelf, from, to } => {
            book::reorder(&mut tracker, &output, shelf, &from, to)?
        }
        Commands::Sort { shelf, order } => book::sort(&mut tracker, &output, shelf, order)?,

        Commands::Goal { goal } => stats_cmd::goal(&mut tracker, &output, goal)?,
        Commands::Stats => stats_cmd::show(&tracker, &output)?,
        Commands::Achievements => stats_cmd::achievements(&tracker, &output)?,
    }

    Ok(())
}
