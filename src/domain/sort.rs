//! Shelf sort orders
//!
//! Sorting is a display projection only: it never touches the persisted
//! insertion order of a shelf. Only an explicit reorder operation may
//! permute that order. Each shelf persists its own chosen sort order
//! independently of the book data.
//!
//! The wishlist only supports title-based orders; rating orders apply to
//! the hangar and archive shelves, with ties broken by title ascending.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::book::Book;
use super::shelf::Shelf;

/// Display ordering for a shelf
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Persisted insertion order
    #[default]
    DefaultOrder,
    /// Title A-Z
    TitleAscending,
    /// Title Z-A
    TitleDescending,
    /// Rating low to high, ties by title A-Z
    RatingAscending,
    /// Rating high to low, ties by title A-Z
    RatingDescending,
}

impl SortOrder {
    /// Sort orders selectable for the given shelf
    pub fn options(shelf: Shelf) -> &'static [SortOrder] {
        if shelf.supports_rating_sort() {
            &[
                SortOrder::DefaultOrder,
                SortOrder::TitleAscending,
                SortOrder::TitleDescending,
                SortOrder::RatingAscending,
                SortOrder::RatingDescending,
            ]
        } else {
            &[
                SortOrder::DefaultOrder,
                SortOrder::TitleAscending,
                SortOrder::TitleDescending,
            ]
        }
    }

    /// Returns true if this order is selectable for the given shelf
    pub fn is_valid_for(&self, shelf: Shelf) -> bool {
        Self::options(shelf).contains(self)
    }

    /// Returns a display label for the sort order
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::DefaultOrder => "Added Order",
            SortOrder::TitleAscending => "Title (A-Z)",
            SortOrder::TitleDescending => "Title (Z-A)",
            SortOrder::RatingAscending => "Rating (Low-High)",
            SortOrder::RatingDescending => "Rating (High-Low)",
        }
    }

    /// Compares two books under this order.
    ///
    /// [`SortOrder::DefaultOrder`] compares equal for all pairs; combined
    /// with a stable sort that leaves insertion order untouched.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortOrder::DefaultOrder => Ordering::Equal,
            SortOrder::TitleAscending => title_cmp(a, b),
            SortOrder::TitleDescending => title_cmp(b, a),
            SortOrder::RatingAscending => a.rating.cmp(&b.rating).then_with(|| title_cmp(a, b)),
            SortOrder::RatingDescending => b.rating.cmp(&a.rating).then_with(|| title_cmp(a, b)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn title_cmp(a: &Book, b: &Book) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

/// Returns shelf positions in display order under the given sort.
///
/// The result maps view index -> position in the persisted sequence, which
/// is what reorder and delete use to translate view coordinates back to
/// persisted coordinates by identity.
pub fn view_positions(books: &[Book], order: SortOrder) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..books.len()).collect();
    // Stable sort: equal keys keep insertion order.
    positions.sort_by(|&a, &b| order.compare(&books[a], &books[b]));
    positions
}

/// Returns book references in display order under the given sort
pub fn sorted<'a>(books: &'a [Book], order: SortOrder) -> Vec<&'a Book> {
    view_positions(books, order)
        .into_iter()
        .map(|i| &books[i])
        .collect()
}
