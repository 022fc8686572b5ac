//! Lifecycle events
//!
//! The library hands an explicit event back from every mutating operation
//! that the stats engine cares about. Events carry the book's final state
//! so the consumer never has to re-query the shelves.

use crate::domain::{Book, Shelf};

/// A state change emitted by the [`Library`](super::Library)
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// A book moved from one shelf to another. `book` is the post-move
    /// state, already reflecting the transition's rating policy.
    Moved { book: Book, from: Shelf, to: Shelf },

    /// A book's rating was overwritten. `book.rating` holds the new
    /// (clamped) value.
    Rated { book: Book, previous_rating: u8 },
}

impl LifecycleEvent {
    /// Returns true if this move put a book into the hangar
    pub fn entered_hangar(&self) -> bool {
        matches!(self, LifecycleEvent::Moved { to: Shelf::Hangar, .. })
    }

    /// Returns true if this move completed a book out of the hangar
    pub fn completed_from_hangar(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::Moved {
                from: Shelf::Hangar,
                to: Shelf::Archive,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(from: Shelf, to: Shelf) -> LifecycleEvent {
        LifecycleEvent::Moved {
            book: Book::new("Dune", "Herbert"),
            from,
            to,
        }
    }

    #[test]
    fn hangar_entry_detection() {
        assert!(event(Shelf::Wishlist, Shelf::Hangar).entered_hangar());
        assert!(event(Shelf::Archive, Shelf::Hangar).entered_hangar());
        assert!(!event(Shelf::Wishlist, Shelf::Archive).entered_hangar());
    }

    #[test]
    fn completion_detection() {
        assert!(event(Shelf::Hangar, Shelf::Archive).completed_from_hangar());
        // Marking a wishlist book as read skips the hangar and is not a
        // completion for stats purposes.
        assert!(!event(Shelf::Wishlist, Shelf::Archive).completed_from_hangar());
        assert!(!event(Shelf::Hangar, Shelf::Wishlist).completed_from_hangar());
    }
}
