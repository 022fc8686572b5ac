//! The library: three ordered shelves and every cross-shelf transition
//!
//! All book mutation is mediated here. Lookups are by identity; a missing
//! identity makes the operation a logged no-op, never an error. Each shelf
//! keeps its persisted insertion order; sorted views are projections and
//! reorder/delete calls that arrive in view coordinates are translated back
//! to persisted positions by identity before anything is touched.

use std::collections::BTreeSet;

use crate::domain::{view_positions, Book, BookId, Shelf, SortOrder};

use super::event::LifecycleEvent;

/// Rating policy for a shelf transition
fn rating_resets(from: Shelf, to: Shelf) -> bool {
    // Marking a wishlist book as read archives it unrated. Every other
    // transition carries the rating along.
    from == Shelf::Wishlist && to == Shelf::Archive
}

/// Owns the three ordered book collections
#[derive(Debug, Clone, Default)]
pub struct Library {
    wishlist: Vec<Book>,
    hangar: Vec<Book>,
    archive: Vec<Book>,
}

impl Library {
    /// Creates an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library from already-loaded shelf contents
    pub fn from_shelves(wishlist: Vec<Book>, hangar: Vec<Book>, archive: Vec<Book>) -> Self {
        Self {
            wishlist,
            hangar,
            archive,
        }
    }

    /// Returns the books on a shelf in persisted insertion order
    pub fn books(&self, shelf: Shelf) -> &[Book] {
        match shelf {
            Shelf::Wishlist => &self.wishlist,
            Shelf::Hangar => &self.hangar,
            Shelf::Archive => &self.archive,
        }
    }

    fn books_mut(&mut self, shelf: Shelf) -> &mut Vec<Book> {
        match shelf {
            Shelf::Wishlist => &mut self.wishlist,
            Shelf::Hangar => &mut self.hangar,
            Shelf::Archive => &mut self.archive,
        }
    }

    /// Total number of tracked books
    pub fn len(&self) -> usize {
        self.wishlist.len() + self.hangar.len() + self.archive.len()
    }

    /// Returns true if no books are tracked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a book by identity across all shelves
    pub fn find(&self, id: &BookId) -> Option<(Shelf, &Book)> {
        Shelf::ALL.iter().find_map(|&shelf| {
            self.books(shelf)
                .iter()
                .find(|b| &b.id == id)
                .map(|b| (shelf, b))
        })
    }

    /// Returns the books on a shelf in display order under the given sort
    pub fn sorted_books(&self, shelf: Shelf, order: SortOrder) -> Vec<&Book> {
        crate::domain::sorted(self.books(shelf), order)
    }

    /// Adds a new book to the wishlist; the entry point for every book
    pub fn add(&mut self, book: Book) -> BookId {
        let id = book.id.clone();
        self.wishlist.push(book);
        id
    }

    /// Overwrites a book's title, author, and notes in place
    ///
    /// Returns false (logged no-op) if the identity is not tracked.
    pub fn edit(&mut self, id: &BookId, title: String, author: String, notes: String) -> bool {
        for shelf in Shelf::ALL {
            if let Some(book) = self.books_mut(shelf).iter_mut().find(|b| &b.id == id) {
                book.title = title;
                book.author = author;
                book.notes = notes;
                return true;
            }
        }
        log::warn!("edit: book {} not found on any shelf", id);
        false
    }

    /// Moves a book between shelves, applying the transition's rating policy.
    ///
    /// Removes from `from` and appends to `to`. If the identity is not on
    /// `from`, nothing happens (no append either, so a book can never be
    /// duplicated across shelves) and None is returned.
    pub fn move_book(&mut self, id: &BookId, from: Shelf, to: Shelf) -> Option<LifecycleEvent> {
        if from == to {
            return None;
        }

        let source = self.books_mut(from);
        let index = match source.iter().position(|b| &b.id == id) {
            Some(i) => i,
            None => {
                log::warn!("move_book: book {} not found on {}", id, from);
                return None;
            }
        };

        let mut book = source.remove(index);
        if rating_resets(from, to) {
            book.rating = 0;
        }

        self.books_mut(to).push(book.clone());
        Some(LifecycleEvent::Moved { book, from, to })
    }

    /// Overwrites a book's rating, clamping the input into 0-5.
    ///
    /// The book is located by identity on whatever shelf currently holds
    /// it. Returns the rating-changed event, or None (logged) if the
    /// identity is not tracked.
    pub fn set_rating(&mut self, id: &BookId, rating: i64) -> Option<LifecycleEvent> {
        for shelf in Shelf::ALL {
            if let Some(book) = self.books_mut(shelf).iter_mut().find(|b| &b.id == id) {
                let previous_rating = book.rating;
                book.set_rating(rating);
                return Some(LifecycleEvent::Rated {
                    book: book.clone(),
                    previous_rating,
                });
            }
        }

        log::warn!("set_rating: book {} not found on any shelf", id);
        None
    }

    /// Reorders a shelf given positions in its displayed (possibly sorted)
    /// view.
    ///
    /// `from` and `to` are view indices under `order`. They are mapped back
    /// to the persisted sequence by identity: the selected books are pulled
    /// out and re-inserted, in view order, before the book currently shown
    /// at `to` (or at the end). Unselected books keep their relative
    /// persisted order. Returns false (logged) on out-of-range indices.
    pub fn reorder(&mut self, shelf: Shelf, order: SortOrder, from: &[usize], to: usize) -> bool {
        let view = view_positions(self.books(shelf), order);

        if from.is_empty() {
            return false;
        }
        if from.iter().any(|&i| i >= view.len()) || to > view.len() {
            log::warn!(
                "reorder: view index out of range on {} (len {})",
                shelf,
                view.len()
            );
            return false;
        }

        let from: BTreeSet<usize> = from.iter().copied().collect();
        let moved_ids: Vec<BookId> = from
            .iter()
            .map(|&i| self.books(shelf)[view[i]].id.clone())
            .collect();

        // Standard move semantics: insert before the element currently at
        // `to`, skipping past any selected elements at that position.
        let anchor_id: Option<BookId> = view[to..]
            .iter()
            .map(|&pos| &self.books(shelf)[pos].id)
            .find(|id| !moved_ids.contains(id))
            .cloned();

        let books = self.books_mut(shelf);
        let mut extracted = Vec::with_capacity(moved_ids.len());
        for id in &moved_ids {
            if let Some(pos) = books.iter().position(|b| &b.id == id) {
                extracted.push(books.remove(pos));
            }
        }

        let insert_at = match &anchor_id {
            Some(id) => books
                .iter()
                .position(|b| &b.id == id)
                .unwrap_or(books.len()),
            None => books.len(),
        };

        for (offset, book) in extracted.into_iter().enumerate() {
            books.insert(insert_at + offset, book);
        }

        true
    }

    /// Deletes books from a shelf by identity.
    ///
    /// Returns the number of books removed. Identities not present on the
    /// shelf are skipped. Deletion has no stats side effects.
    pub fn delete(&mut self, shelf: Shelf, ids: &[BookId]) -> usize {
        let books = self.books_mut(shelf);
        let before = books.len();
        books.retain(|b| !ids.contains(&b.id));
        let removed = before - books.len();

        if removed < ids.len() {
            log::warn!(
                "delete: {} of {} ids not found on {}",
                ids.len() - removed,
                ids.len(),
                shelf
            );
        }
        removed
    }

    /// Deletes books given positions in the shelf's displayed view.
    ///
    /// View indices under `order` are translated to identities first, so a
    /// sorted view deletes the books the user saw, not the books that
    /// happened to share those offsets in the persisted order.
    pub fn delete_at(&mut self, shelf: Shelf, order: SortOrder, indices: &[usize]) -> usize {
        let view = view_positions(self.books(shelf), order);
        let ids: Vec<BookId> = indices
            .iter()
            .filter_map(|&i| view.get(i).map(|&pos| self.books(shelf)[pos].id.clone()))
            .collect();

        if ids.len() < indices.len() {
            log::warn!(
                "delete_at: {} view indices out of range on {}",
                indices.len() - ids.len(),
                shelf
            );
        }
        self.delete(shelf, &ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn library_with(titles: &[&str], shelf: Shelf) -> (Library, Vec<BookId>) {
        let mut library = Library::new();
        let mut ids = Vec::new();
        for title in titles {
            let id = library.add(Book::new(*title, "Author"));
            ids.push(id);
        }
        if shelf != Shelf::Wishlist {
            for id in &ids {
                library.move_book(id, Shelf::Wishlist, shelf).unwrap();
            }
        }
        (library, ids)
    }

    fn titles(library: &Library, shelf: Shelf) -> Vec<String> {
        library
            .books(shelf)
            .iter()
            .map(|b| b.title.clone())
            .collect()
    }

    #[test]
    fn add_appends_to_wishlist() {
        let mut library = Library::new();
        let id = library.add(Book::new("Dune", "Herbert"));

        assert_eq!(library.books(Shelf::Wishlist).len(), 1);
        assert!(library.books(Shelf::Hangar).is_empty());
        let (shelf, book) = library.find(&id).unwrap();
        assert_eq!(shelf, Shelf::Wishlist);
        assert_eq!(book.title, "Dune");
    }

    #[test]
    fn wishlist_to_archive_resets_rating() {
        let (mut library, ids) = library_with(&["Dune"], Shelf::Wishlist);
        library.set_rating(&ids[0], 4);

        let event = library
            .move_book(&ids[0], Shelf::Wishlist, Shelf::Archive)
            .unwrap();

        match event {
            LifecycleEvent::Moved { book, from, to } => {
                assert_eq!(book.rating, 0);
                assert_eq!(from, Shelf::Wishlist);
                assert_eq!(to, Shelf::Archive);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(library.books(Shelf::Archive)[0].rating, 0);
    }

    #[test]
    fn all_other_transitions_preserve_rating() {
        let transitions = [
            (Shelf::Wishlist, Shelf::Hangar),
            (Shelf::Archive, Shelf::Hangar),
            (Shelf::Hangar, Shelf::Archive),
            (Shelf::Hangar, Shelf::Wishlist),
            (Shelf::Archive, Shelf::Wishlist),
        ];

        for (from, to) in transitions {
            let (mut library, ids) = library_with(&["Dune"], from);
            library.set_rating(&ids[0], 3);

            library.move_book(&ids[0], from, to).unwrap();
            let (shelf, book) = library.find(&ids[0]).unwrap();
            assert_eq!(shelf, to, "{} -> {}", from, to);
            assert_eq!(book.rating, 3, "{} -> {} should preserve rating", from, to);
        }
    }

    #[test]
    fn move_missing_book_is_noop() {
        let (mut library, ids) = library_with(&["Dune"], Shelf::Wishlist);

        // Wrong source shelf: nothing removed, nothing appended.
        let event = library.move_book(&ids[0], Shelf::Hangar, Shelf::Archive);
        assert!(event.is_none());
        assert_eq!(library.books(Shelf::Wishlist).len(), 1);
        assert!(library.books(Shelf::Archive).is_empty());
    }

    #[test]
    fn book_never_on_two_shelves() {
        let (mut library, ids) = library_with(&["Dune"], Shelf::Wishlist);
        let id = &ids[0];

        library.move_book(id, Shelf::Wishlist, Shelf::Hangar);
        library.move_book(id, Shelf::Hangar, Shelf::Archive);
        library.move_book(id, Shelf::Archive, Shelf::Hangar);
        library.move_book(id, Shelf::Hangar, Shelf::Wishlist);

        let occurrences: usize = Shelf::ALL
            .iter()
            .map(|&s| library.books(s).iter().filter(|b| &b.id == id).count())
            .sum();
        assert_eq!(occurrences, 1);
        assert_eq!(library.find(id).unwrap().0, Shelf::Wishlist);
    }

    #[test]
    fn set_rating_clamps_and_reports_previous() {
        let (mut library, ids) = library_with(&["Dune"], Shelf::Archive);

        let event = library.set_rating(&ids[0], 99).unwrap();
        match event {
            LifecycleEvent::Rated {
                book,
                previous_rating,
            } => {
                assert_eq!(book.rating, 5);
                assert_eq!(previous_rating, 0);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let event = library.set_rating(&ids[0], -2).unwrap();
        match event {
            LifecycleEvent::Rated {
                book,
                previous_rating,
            } => {
                assert_eq!(book.rating, 0);
                assert_eq!(previous_rating, 5);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn set_rating_missing_book_is_noop() {
        let mut library = Library::new();
        let ghost = Book::new("Ghost", "Nobody");
        assert!(library.set_rating(&ghost.id, 5).is_none());
    }

    #[test]
    fn reorder_in_default_order() {
        let (mut library, _) = library_with(&["A", "B", "C", "D"], Shelf::Wishlist);

        // Move A to just before D.
        assert!(library.reorder(Shelf::Wishlist, SortOrder::DefaultOrder, &[0], 3));
        assert_eq!(titles(&library, Shelf::Wishlist), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn reorder_to_end() {
        let (mut library, _) = library_with(&["A", "B", "C"], Shelf::Wishlist);

        assert!(library.reorder(Shelf::Wishlist, SortOrder::DefaultOrder, &[0], 3));
        assert_eq!(titles(&library, Shelf::Wishlist), vec!["B", "C", "A"]);
    }

    #[test]
    fn reorder_multiple_keeps_selection_order() {
        let (mut library, _) = library_with(&["A", "B", "C", "D"], Shelf::Wishlist);

        assert!(library.reorder(Shelf::Wishlist, SortOrder::DefaultOrder, &[1, 3], 0));
        assert_eq!(titles(&library, Shelf::Wishlist), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn reorder_translates_sorted_view_indices_by_identity() {
        // Persisted: C, A, B. Title-ascending view: A, B, C.
        let (mut library, _) = library_with(&["C", "A", "B"], Shelf::Wishlist);

        // In the sorted view, move A (view 0) before C (view 2). A must be
        // the book that moves, even though persisted position 0 holds C.
        assert!(library.reorder(Shelf::Wishlist, SortOrder::TitleAscending, &[0], 2));

        // C is the anchor; A is re-inserted before C's persisted slot, B
        // keeps its relative order.
        assert_eq!(titles(&library, Shelf::Wishlist), vec!["A", "C", "B"]);
    }

    #[test]
    fn reorder_rejects_out_of_range() {
        let (mut library, _) = library_with(&["A", "B"], Shelf::Wishlist);
        assert!(!library.reorder(Shelf::Wishlist, SortOrder::DefaultOrder, &[5], 0));
        assert!(!library.reorder(Shelf::Wishlist, SortOrder::DefaultOrder, &[0], 9));
        assert_eq!(titles(&library, Shelf::Wishlist), vec!["A", "B"]);
    }

    #[test]
    fn delete_by_id() {
        let (mut library, ids) = library_with(&["A", "B", "C"], Shelf::Wishlist);

        let removed = library.delete(Shelf::Wishlist, &[ids[1].clone()]);
        assert_eq!(removed, 1);
        assert_eq!(titles(&library, Shelf::Wishlist), vec!["A", "C"]);
    }

    #[test]
    fn delete_missing_id_is_noop() {
        let (mut library, _) = library_with(&["A"], Shelf::Wishlist);
        let ghost = Book::new("Ghost", "Nobody");
        assert_eq!(library.delete(Shelf::Wishlist, &[ghost.id]), 0);
        assert_eq!(library.books(Shelf::Wishlist).len(), 1);
    }

    #[test]
    fn delete_at_translates_sorted_view_indices() {
        // Persisted: C, A, B. Title-ascending view: A, B, C.
        let (mut library, _) = library_with(&["C", "A", "B"], Shelf::Wishlist);

        // Deleting view index 0 must delete A, not C.
        let removed = library.delete_at(Shelf::Wishlist, SortOrder::TitleAscending, &[0]);
        assert_eq!(removed, 1);
        assert_eq!(titles(&library, Shelf::Wishlist), vec!["C", "B"]);
    }

    #[test]
    fn edit_updates_attributes_in_place() {
        let (mut library, ids) = library_with(&["Dune"], Shelf::Hangar);

        assert!(library.edit(
            &ids[0],
            "Dune Messiah".to_string(),
            "Frank Herbert".to_string(),
            "sequel".to_string()
        ));
        let (_, book) = library.find(&ids[0]).unwrap();
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.notes, "sequel");
        assert_eq!(book.id, ids[0]);
    }

    proptest! {
        #[test]
        fn prop_set_rating_always_in_range(input in any::<i64>()) {
            let (mut library, ids) = library_with(&["Dune"], Shelf::Archive);
            library.set_rating(&ids[0], input);
            let (_, book) = library.find(&ids[0]).unwrap();
            prop_assert!(book.rating <= 5);
        }

        #[test]
        fn prop_moves_never_duplicate(
            moves in proptest::collection::vec((0usize..3, 0usize..3), 0..40)
        ) {
            let (mut library, ids) = library_with(&["A", "B", "C"], Shelf::Wishlist);

            for (from, to) in moves {
                let from = Shelf::ALL[from];
                let to = Shelf::ALL[to];
                for id in &ids {
                    library.move_book(id, from, to);
                }
            }

            for id in &ids {
                let occurrences: usize = Shelf::ALL
                    .iter()
                    .map(|&s| library.books(s).iter().filter(|b| &b.id == id).count())
                    .sum();
                prop_assert_eq!(occurrences, 1);
            }
        }
    }
}
