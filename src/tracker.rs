//! Tracker facade
//!
//! Wires the [`Library`], the [`StatsEngine`], and per-shelf sort
//! preferences over a [`BlobStore`]. Constructed explicitly and passed to
//! whatever front end drives it; there is no global instance.
//!
//! Every mutating operation commits the touched keys before returning. A
//! failed write is logged and dropped; the in-memory state remains
//! authoritative for the rest of the session, accepting possible loss on
//! the next restart. Loads are fail-safe: a corrupt blob resets that value
//! to its default without surfacing an error.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Book, BookId, Shelf, SortOrder};
use crate::stats::{AchievementId, ReadingStats, StatsEngine};
use crate::storage::BlobStore;
use crate::store::Library;

const STATS_KEY: &str = "readingStats";

/// The application facade: shelves, stats, sort preferences, persistence
pub struct Tracker {
    library: Library,
    engine: StatsEngine,
    sort_orders: [SortOrder; 3],
    store: Box<dyn BlobStore>,
}

fn shelf_index(shelf: Shelf) -> usize {
    match shelf {
        Shelf::Wishlist => 0,
        Shelf::Hangar => 1,
        Shelf::Archive => 2,
    }
}

fn load_json<T: DeserializeOwned + Default>(store: &dyn BlobStore, key: &str) -> T {
    let Some(bytes) = store.load(key) else {
        return T::default();
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("resetting '{}' to default: failed to decode: {}", key, e);
            T::default()
        }
    }
}

impl Tracker {
    /// Opens a tracker over the given blob store, loading all persisted
    /// state with fail-safe defaults.
    pub fn open(store: Box<dyn BlobStore>) -> Self {
        let wishlist: Vec<Book> = load_json(store.as_ref(), Shelf::Wishlist.storage_key());
        let hangar: Vec<Book> = load_json(store.as_ref(), Shelf::Hangar.storage_key());
        let archive: Vec<Book> = load_json(store.as_ref(), Shelf::Archive.storage_key());
        let stats: ReadingStats = load_json(store.as_ref(), STATS_KEY);

        let mut sort_orders = [SortOrder::DefaultOrder; 3];
        for shelf in Shelf::ALL {
            let order: SortOrder = load_json(store.as_ref(), shelf.sort_order_key());
            if order.is_valid_for(shelf) {
                sort_orders[shelf_index(shelf)] = order;
            } else {
                log::warn!("sort order {:?} not valid for {}, using default", order, shelf);
            }
        }

        Self {
            library: Library::from_shelves(wishlist, hangar, archive),
            engine: StatsEngine::with_stats(stats),
            sort_orders,
            store,
        }
    }

    /// Books on a shelf in persisted insertion order
    pub fn books(&self, shelf: Shelf) -> &[Book] {
        self.library.books(shelf)
    }

    /// Books on a shelf in display order under its current sort preference
    pub fn sorted_books(&self, shelf: Shelf) -> Vec<&Book> {
        self.library.sorted_books(shelf, self.sort_order(shelf))
    }

    /// Finds a book by identity across all shelves
    pub fn find(&self, id: &BookId) -> Option<(Shelf, &Book)> {
        self.library.find(id)
    }

    /// Current reading statistics
    pub fn stats(&self) -> &ReadingStats {
        self.engine.stats()
    }

    /// Current sort preference for a shelf
    pub fn sort_order(&self, shelf: Shelf) -> SortOrder {
        self.sort_orders[shelf_index(shelf)]
    }

    /// Sets a shelf's sort preference; rejects orders the shelf doesn't
    /// support (rating sorts on the wishlist).
    pub fn set_sort_order(&mut self, shelf: Shelf, order: SortOrder) -> bool {
        if !order.is_valid_for(shelf) {
            log::warn!("sort order {:?} not valid for {}", order, shelf);
            return false;
        }
        self.sort_orders[shelf_index(shelf)] = order;
        self.save_json(shelf.sort_order_key(), &order);
        true
    }

    /// Adds a new book to the wishlist
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        notes: impl Into<String>,
    ) -> BookId {
        let book = Book::new(title, author).with_notes(notes);
        let id = self.library.add(book);
        self.commit_shelf(Shelf::Wishlist);
        id
    }

    /// Edits a book's attributes in place, wherever it currently lives
    pub fn edit_book(&mut self, id: &BookId, title: String, author: String, notes: String) -> bool {
        if !self.library.edit(id, title, author, notes) {
            return false;
        }
        if let Some((shelf, _)) = self.library.find(id) {
            self.commit_shelf(shelf);
        }
        true
    }

    /// Moves a book between shelves, feeding the resulting event to the
    /// stats engine. Returns false if the book was not on `from`.
    pub fn move_book(&mut self, id: &BookId, from: Shelf, to: Shelf) -> bool {
        let Some(event) = self.library.move_book(id, from, to) else {
            return false;
        };
        self.engine.apply(&event);
        self.commit_shelf(from);
        self.commit_shelf(to);
        self.commit_stats();
        true
    }

    /// Overwrites a book's rating (clamped to 0-5), updating rating stats.
    /// Returns false if the identity is not tracked.
    pub fn set_rating(&mut self, id: &BookId, rating: i64) -> bool {
        let Some(event) = self.library.set_rating(id, rating) else {
            return false;
        };
        self.engine.apply(&event);
        if let Some((shelf, _)) = self.library.find(id) {
            self.commit_shelf(shelf);
        }
        self.commit_stats();
        true
    }

    /// Sets the yearly completion goal
    pub fn set_yearly_goal(&mut self, goal: u32) {
        self.engine.set_yearly_goal(goal);
        self.commit_stats();
    }

    /// Reorders a shelf given positions in its current displayed view
    pub fn reorder(&mut self, shelf: Shelf, from: &[usize], to: usize) -> bool {
        let order = self.sort_order(shelf);
        if !self.library.reorder(shelf, order, from, to) {
            return false;
        }
        self.commit_shelf(shelf);
        true
    }

    /// Deletes books from a shelf by identity; no stats side effects
    pub fn delete(&mut self, shelf: Shelf, ids: &[BookId]) -> usize {
        let removed = self.library.delete(shelf, ids);
        if removed > 0 {
            self.commit_shelf(shelf);
        }
        removed
    }

    /// Deletes books given positions in the shelf's current displayed view
    pub fn delete_at(&mut self, shelf: Shelf, indices: &[usize]) -> usize {
        let order = self.sort_order(shelf);
        let removed = self.library.delete_at(shelf, order, indices);
        if removed > 0 {
            self.commit_shelf(shelf);
        }
        removed
    }

    /// Drains achievements earned since the last drain
    pub fn take_new_achievements(&mut self) -> Vec<AchievementId> {
        self.engine.take_new_achievements()
    }

    fn commit_shelf(&self, shelf: Shelf) {
        self.save_json(shelf.storage_key(), &self.library.books(shelf));
    }

    fn commit_stats(&self) {
        self.save_json(STATS_KEY, self.engine.stats());
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                // Dropped write: keep running on in-memory state.
                log::error!("failed to encode '{}', write dropped: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.save(key, &bytes) {
            log::error!("failed to save '{}', write dropped: {}", key, e);
        }
    }
}
