//! Statistics engine
//!
//! Consumes lifecycle events from the library and incrementally maintains
//! [`ReadingStats`], re-running the achievement evaluator after every
//! stats-mutating event. Newly earned achievements queue up until the
//! presentation layer drains them; draining never touches the earned set.
//!
//! Every handler has an `*_at` variant taking an explicit clock so tests
//! can walk across calendar days.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::Book;
use crate::store::LifecycleEvent;

use super::achievements::{self, AchievementId};
use super::model::{month_label, year_label, ReadingStats};

/// Maintains reading statistics from lifecycle events
#[derive(Debug, Default)]
pub struct StatsEngine {
    stats: ReadingStats,
    pending: Vec<AchievementId>,
}

impl StatsEngine {
    /// Creates an engine with fresh stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine over previously loaded stats
    pub fn with_stats(stats: ReadingStats) -> Self {
        Self {
            stats,
            pending: Vec::new(),
        }
    }

    /// Current statistics
    pub fn stats(&self) -> &ReadingStats {
        &self.stats
    }

    /// Dispatches a lifecycle event to the matching handler
    pub fn apply(&mut self, event: &LifecycleEvent) {
        self.apply_at(event, Utc::now());
    }

    /// Dispatches a lifecycle event with an explicit clock
    pub fn apply_at(&mut self, event: &LifecycleEvent, now: DateTime<Utc>) {
        match event {
            LifecycleEvent::Moved { book, .. } => {
                if event.entered_hangar() {
                    self.book_entered_hangar_at(book, now);
                } else if event.completed_from_hangar() {
                    self.book_completed_at(book, now);
                }
                // Other moves (mark read, unread, abandon) carry no stats.
            }
            LifecycleEvent::Rated {
                book,
                previous_rating,
            } => {
                self.book_rated_at(book, *previous_rating, now);
            }
        }
    }

    /// Records a book entering the hangar
    pub fn book_entered_hangar(&mut self, book: &Book) {
        self.book_entered_hangar_at(book, Utc::now());
    }

    /// Records a book entering the hangar with an explicit clock
    pub fn book_entered_hangar_at(&mut self, book: &Book, now: DateTime<Utc>) {
        self.stats.hangar_entry_dates.insert(book.id.clone(), now);
        self.stats.total_books_moved_to_hangar += 1;
    }

    /// Records a book completing out of the hangar
    pub fn book_completed(&mut self, book: &Book) {
        self.book_completed_at(book, Utc::now());
    }

    /// Records a completion with an explicit clock
    pub fn book_completed_at(&mut self, book: &Book, now: DateTime<Utc>) {
        let today = now.date_naive();
        let year = year_label(today);
        let month = month_label(today);

        *self
            .stats
            .books_completed_by_year
            .entry(year.clone())
            .or_insert(0) += 1;
        *self.stats.books_completed_by_month.entry(month).or_insert(0) += 1;
        self.stats.current_year_books_read =
            self.stats.books_completed_by_year.get(&year).copied().unwrap_or(0);

        self.update_reading_streak(today);
        self.stats.fold_hangar_dwell(&book.id, now);
        self.evaluate_achievements(now);
    }

    /// Records a rating change
    pub fn book_rated(&mut self, book: &Book, previous_rating: u8) {
        self.book_rated_at(book, previous_rating, Utc::now());
    }

    /// Records a rating change with an explicit clock.
    ///
    /// `book.rating` holds the new value. The previous rating's bucket is
    /// decremented (and dropped at zero); a first-ever rating bumps the
    /// rated-books counter. Clearing a rating back to 0 removes the old
    /// bucket entry but adds nothing: the distribution only carries
    /// buckets 1-5.
    pub fn book_rated_at(&mut self, book: &Book, previous_rating: u8, now: DateTime<Utc>) {
        if previous_rating > 0 {
            if let Some(count) = self.stats.rating_distribution.get_mut(&previous_rating) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    self.stats.rating_distribution.remove(&previous_rating);
                }
            }
        } else if book.rating > 0 {
            self.stats.total_rated_books += 1;
        }

        if book.rating > 0 {
            *self
                .stats
                .rating_distribution
                .entry(book.rating)
                .or_insert(0) += 1;
        }

        self.stats.recompute_average_rating();
        self.evaluate_achievements(now);
    }

    /// Sets the yearly completion goal; the one user-editable stats field
    pub fn set_yearly_goal(&mut self, goal: u32) {
        self.set_yearly_goal_at(goal, Utc::now());
    }

    /// Sets the yearly goal with an explicit clock
    pub fn set_yearly_goal_at(&mut self, goal: u32, now: DateTime<Utc>) {
        self.stats.yearly_goal = goal;
        self.evaluate_achievements(now);
    }

    /// Drains the queue of achievements earned since the last drain.
    ///
    /// Clearing the queue does not affect the earned set.
    pub fn take_new_achievements(&mut self) -> Vec<AchievementId> {
        std::mem::take(&mut self.pending)
    }

    /// Streak update, driven strictly by completion events.
    ///
    /// A same-day completion leaves the streak as is, a completion the day
    /// after the last one extends it, and anything else starts over at 1.
    /// There is no decay while no books complete; a gap only shows up as a
    /// reset on the next completion.
    fn update_reading_streak(&mut self, today: NaiveDate) {
        if self.stats.streak_continues(today) {
            if self.stats.last_reading_date != Some(today) {
                self.stats.current_streak += 1;
            }
        } else {
            self.stats.current_streak = 1;
        }

        self.stats.last_reading_date = Some(today);
        self.stats.longest_streak = self.stats.longest_streak.max(self.stats.current_streak);
    }

    fn evaluate_achievements(&mut self, now: DateTime<Utc>) {
        let newly_earned = achievements::evaluate(&mut self.stats, now);
        self.pending.extend(newly_earned);
    }
}
