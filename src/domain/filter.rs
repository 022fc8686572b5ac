//! Rating-based list filters
//!
//! Pure predicates over a shelf projection; filtering never changes what is
//! stored, only what is shown.

use serde::{Deserialize, Serialize};

use super::book::Book;

/// Filter applied to a displayed book list
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum FilterOption {
    /// All books
    #[default]
    All,
    /// Books with any rating (1-5)
    Rated,
    /// Books with no rating yet
    Unrated,
    /// 4-5 star books
    HighRated,
    /// 1-3 star books
    LowRated,
}

impl FilterOption {
    /// Returns a display label for the filter
    pub fn label(&self) -> &'static str {
        match self {
            FilterOption::All => "All Books",
            FilterOption::Rated => "Rated (1-5)",
            FilterOption::Unrated => "Unrated",
            FilterOption::HighRated => "4-5 Stars Only",
            FilterOption::LowRated => "1-3 Stars Only",
        }
    }

    /// Returns true if the book passes this filter
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            FilterOption::All => true,
            FilterOption::Rated => book.is_rated(),
            FilterOption::Unrated => !book.is_rated(),
            FilterOption::HighRated => book.rating >= 4,
            FilterOption::LowRated => book.rating > 0 && book.rating <= 3,
        }
    }

    /// Filters a list of book references
    pub fn apply<'a>(&self, books: Vec<&'a Book>) -> Vec<&'a Book> {
        books.into_iter().filter(|b| self.matches(b)).collect()
    }
}
