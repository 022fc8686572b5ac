//! StarBooks - A local-first reading tracker
//!
//! StarBooks tracks books across three shelves (wishlist, hangar for
//! in-progress reads, archive for finished ones) with ratings, notes,
//! per-shelf sort orders, and a gamified layer of reading statistics and
//! achievements. All state lives in a local key-value blob store.

pub mod cli;
pub mod domain;
pub mod stats;
pub mod storage;
pub mod store;
pub mod tracker;

pub use domain::{Book, BookId, FilterOption, Shelf, SortOrder};
pub use stats::{AchievementId, ReadingStats, StatsEngine};
pub use store::{Library, LifecycleEvent};
pub use tracker::Tracker;
