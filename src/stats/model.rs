//! Reading statistics aggregate
//!
//! Derived state maintained from lifecycle events; the only field a user
//! edits directly is `yearly_goal`. Serialized as a single JSON blob under
//! the `readingStats` key, with camelCase field names matching the
//! persisted format.
//!
//! `rating_distribution` reflects ratings as of the last rating-set event.
//! It is deliberately not decremented when a rated book is deleted or
//! dropped from tracking; only explicit rating changes touch it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::BookId;

/// Aggregate reading statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingStats {
    /// Consecutive calendar days with at least one completion
    pub current_streak: u32,

    /// Longest streak ever reached
    pub longest_streak: u32,

    /// Day of the most recent completion
    pub last_reading_date: Option<NaiveDate>,

    /// Completions per year, keyed "YYYY"
    pub books_completed_by_year: BTreeMap<String, u32>,

    /// Completions per month, keyed "YYYY-MM"
    pub books_completed_by_month: BTreeMap<String, u32>,

    /// User-set completion target for the current year (0 = unset)
    pub yearly_goal: u32,

    /// Mirror of `books_completed_by_year[current year]`
    pub current_year_books_read: u32,

    /// When each in-progress book entered the hangar
    pub hangar_entry_dates: HashMap<BookId, DateTime<Utc>>,

    /// Lifetime count of hangar entries; never decremented
    pub total_books_moved_to_hangar: u32,

    /// Running mean of days between hangar entry and completion
    pub average_days_in_hangar: f64,

    /// Count of books that have held a rating > 0 at least once
    pub total_rated_books: u32,

    /// Mean over `rating_distribution`, 0.0 when no ratings
    pub average_rating: f64,

    /// Current rating -> book count, buckets 1-5 only
    pub rating_distribution: BTreeMap<u8, u32>,

    /// Earned achievement identifiers; append-only
    pub achievements: BTreeSet<String>,
}

/// Formats a date's year label, e.g. "2026"
pub fn year_label(date: NaiveDate) -> String {
    format!("{:04}", date.year())
}

/// Formats a date's month label, e.g. "2026-08"
pub fn month_label(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

impl ReadingStats {
    /// Total completions across all years
    pub fn total_books_completed(&self) -> u32 {
        self.books_completed_by_year.values().sum()
    }

    /// Number of books currently holding the given rating
    pub fn rated_count(&self, rating: u8) -> u32 {
        self.rating_distribution.get(&rating).copied().unwrap_or(0)
    }

    /// Returns true if an unbroken streak reaches `today`.
    ///
    /// The streak continues iff the last completion was today or yesterday.
    /// A gap of two or more days breaks it. No prior completion means there
    /// is nothing to continue.
    pub fn streak_continues(&self, today: NaiveDate) -> bool {
        match self.last_reading_date {
            None => false,
            Some(last) => last == today || Some(last) == today.pred_opt(),
        }
    }

    /// Folds one completed book's hangar dwell time into the running mean
    /// and drops its entry.
    ///
    /// The sample count is `total_books_moved_to_hangar` at the time of the
    /// call. A missing entry contributes zero days but still counts as a
    /// sample.
    pub fn fold_hangar_dwell(&mut self, id: &BookId, now: DateTime<Utc>) {
        let days = self
            .hangar_entry_dates
            .remove(id)
            .map(|entered| (now - entered).num_days().max(0) as f64)
            .unwrap_or(0.0);

        let n = self.total_books_moved_to_hangar.max(1) as f64;
        self.average_days_in_hangar = (self.average_days_in_hangar * (n - 1.0) + days) / n;
    }

    /// Recomputes the mean rating from the distribution buckets
    pub fn recompute_average_rating(&mut self) {
        let count: u32 = self.rating_distribution.values().sum();
        if count == 0 {
            self.average_rating = 0.0;
            return;
        }
        let points: u32 = self
            .rating_distribution
            .iter()
            .map(|(rating, n)| u32::from(*rating) * n)
            .sum();
        self.average_rating = f64::from(points) / f64::from(count);
    }

    /// Human-readable streak summary
    pub fn streak_description(&self) -> String {
        match self.current_streak {
            0 => "Start your reading streak!".to_string(),
            1 => "1 day streak".to_string(),
            n => format!("{} day streak", n),
        }
    }

    /// Fraction of the yearly goal reached, 0.0 when no goal is set
    pub fn yearly_goal_progress(&self) -> f64 {
        if self.yearly_goal == 0 {
            return 0.0;
        }
        f64::from(self.current_year_books_read) / f64::from(self.yearly_goal)
    }

    /// Human-readable yearly goal summary
    pub fn yearly_goal_description(&self) -> String {
        if self.yearly_goal == 0 {
            "Set a yearly goal".to_string()
        } else {
            format!(
                "{}/{} books this year",
                self.current_year_books_read, self.yearly_goal
            )
        }
    }

    /// Human-readable average rating summary
    pub fn average_rating_description(&self) -> String {
        if self.average_rating == 0.0 {
            "Start rating books".to_string()
        } else {
            format!("{:.1} average rating", self.average_rating)
        }
    }

    /// Human-readable hangar dwell summary
    pub fn hangar_time_description(&self) -> String {
        if self.average_days_in_hangar == 0.0 {
            "No completed books yet".to_string()
        } else {
            format!("{:.1} days average reading time", self.average_days_in_hangar)
        }
    }
}
