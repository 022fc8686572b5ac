//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Books | Add, inspect, edit | `add`, `list`, `show`, `edit` |
//! | Lifecycle | Shelf transitions | `start`, `finish`, `abandon`, `read`, `unread`, `reread` |
//! | Shelf | Ordering and cleanup | `rate`, `delete`, `reorder`, `sort` |
//! | Stats | Goals and progress | `stats`, `goal`, `achievements` |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod book;
mod output;
mod stats_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
