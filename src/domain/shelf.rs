//! The three book shelves
//!
//! Every tracked book lives on exactly one shelf at a time. Shelf membership
//! is the book's lifecycle stage; moving between shelves is mediated by the
//! [`Library`](crate::store::Library).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Shelf {
    /// Books not yet started
    Wishlist,
    /// Books currently being read
    Hangar,
    /// Completed books
    Archive,
}

impl Shelf {
    /// All shelves, in display order
    pub const ALL: [Shelf; 3] = [Shelf::Wishlist, Shelf::Hangar, Shelf::Archive];

    /// Returns a display label for the shelf
    pub fn label(&self) -> &'static str {
        match self {
            Shelf::Wishlist => "Wishlist",
            Shelf::Hangar => "Hangar",
            Shelf::Archive => "Archive",
        }
    }

    /// Returns the persistence key for this shelf's book list
    pub fn storage_key(&self) -> &'static str {
        match self {
            Shelf::Wishlist => "holocronWishlist",
            Shelf::Hangar => "inTheHangar",
            Shelf::Archive => "jediArchives",
        }
    }

    /// Returns the persistence key for this shelf's sort order
    pub fn sort_order_key(&self) -> &'static str {
        match self {
            Shelf::Wishlist => "wishlistSortOrder",
            Shelf::Hangar => "hangarSortOrder",
            Shelf::Archive => "archivesSortOrder",
        }
    }

    /// Returns true if rating-based sort orders apply to this shelf
    pub fn supports_rating_sort(&self) -> bool {
        matches!(self, Shelf::Hangar | Shelf::Archive)
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_are_distinct() {
        assert_eq!(Shelf::Wishlist.storage_key(), "holocronWishlist");
        assert_eq!(Shelf::Hangar.storage_key(), "inTheHangar");
        assert_eq!(Shelf::Archive.storage_key(), "jediArchives");
    }

    #[test]
    fn sort_order_keys() {
        assert_eq!(Shelf::Wishlist.sort_order_key(), "wishlistSortOrder");
        assert_eq!(Shelf::Hangar.sort_order_key(), "hangarSortOrder");
        assert_eq!(Shelf::Archive.sort_order_key(), "archivesSortOrder");
    }

    #[test]
    fn rating_sort_support() {
        assert!(!Shelf::Wishlist.supports_rating_sort());
        assert!(Shelf::Hangar.supports_rating_sort());
        assert!(Shelf::Archive.supports_rating_sort());
    }
}
