//! Domain models for StarBooks
//!
//! Contains the core book and shelf types without any I/O concerns.

mod book;
mod filter;
mod id;
mod shelf;
mod sort;

pub use book::{clamp_rating, Book, MAX_RATING};
pub use filter::FilterOption;
pub use id::{BookId, IdError};
pub use shelf::Shelf;
pub use sort::{sorted, view_positions, SortOrder};
