//! End-to-end lifecycle tests over the tracker facade
//!
//! These run the full wire-up (library -> stats engine -> achievement
//! evaluator -> blob store) the way a front end would drive it.

use starbooks::storage::{BlobStore, FileStore, MemoryStore};
use starbooks::{ReadingStats, Shelf, SortOrder, Tracker};

use tempfile::TempDir;

fn memory_tracker() -> Tracker {
    Tracker::open(Box::new(MemoryStore::new()))
}

#[test]
fn add_start_finish_scenario() {
    let mut tracker = memory_tracker();

    let id = tracker.add_book("Dune", "Herbert", "");
    tracker.set_rating(&id, 4);

    assert!(tracker.move_book(&id, Shelf::Wishlist, Shelf::Hangar));
    assert!(tracker.move_book(&id, Shelf::Hangar, Shelf::Archive));

    // Exactly one book, on the archive, rating preserved through the hangar.
    assert!(tracker.books(Shelf::Wishlist).is_empty());
    assert!(tracker.books(Shelf::Hangar).is_empty());
    let archive = tracker.books(Shelf::Archive);
    assert_eq!(archive.len(), 1);
    assert_eq!(archive[0].title, "Dune");
    assert_eq!(archive[0].rating, 4);

    let year = starbooks::stats::year_label(chrono::Utc::now().date_naive());
    assert_eq!(tracker.stats().books_completed_by_year.get(&year), Some(&1));
    assert_eq!(tracker.stats().total_books_moved_to_hangar, 1);
    assert!(tracker.stats().hangar_entry_dates.is_empty());
}

#[test]
fn mark_read_archives_unrated() {
    let mut tracker = memory_tracker();

    let id = tracker.add_book("Dune", "Herbert", "");
    tracker.set_rating(&id, 5);

    assert!(tracker.move_book(&id, Shelf::Wishlist, Shelf::Archive));
    assert_eq!(tracker.books(Shelf::Archive)[0].rating, 0);

    // Skipping the hangar counts nothing toward completion stats.
    assert_eq!(tracker.stats().total_books_moved_to_hangar, 0);
    assert_eq!(tracker.stats().current_year_books_read, 0);
}

#[test]
fn first_completion_unlocks_first_book() {
    let mut tracker = memory_tracker();

    let id = tracker.add_book("Dune", "Herbert", "");
    tracker.move_book(&id, Shelf::Wishlist, Shelf::Hangar);
    tracker.move_book(&id, Shelf::Hangar, Shelf::Archive);

    let unlocked = tracker.take_new_achievements();
    assert!(unlocked
        .iter()
        .any(|a| a.as_str() == "firstBook"));
    assert!(tracker.stats().achievements.contains("firstBook"));

    // Drained queue stays empty; the earned set does not.
    assert!(tracker.take_new_achievements().is_empty());
    assert!(tracker.stats().achievements.contains("firstBook"));
}

#[test]
fn yearly_goal_met_once() {
    let mut tracker = memory_tracker();
    tracker.set_yearly_goal(1);

    let a = tracker.add_book("A", "x", "");
    tracker.move_book(&a, Shelf::Wishlist, Shelf::Hangar);
    tracker.move_book(&a, Shelf::Hangar, Shelf::Archive);
    let unlocked = tracker.take_new_achievements();
    assert!(unlocked.iter().any(|a| a.as_str() == "yearlyGoalMet"));

    let b = tracker.add_book("B", "x", "");
    tracker.move_book(&b, Shelf::Wishlist, Shelf::Hangar);
    tracker.move_book(&b, Shelf::Hangar, Shelf::Archive);
    let unlocked = tracker.take_new_achievements();
    assert!(!unlocked.iter().any(|a| a.as_str() == "yearlyGoalMet"));
}

#[test]
fn ten_five_star_books_unlock_five_star_fan() {
    let mut tracker = memory_tracker();

    for i in 0..10 {
        let id = tracker.add_book(format!("Book {}", i), "x", "");
        tracker.set_rating(&id, 5);
    }

    let unlocked = tracker.take_new_achievements();
    assert!(unlocked.iter().any(|a| a.as_str() == "fiveStarFan"));

    // An eleventh book does not duplicate the earned entry.
    let id = tracker.add_book("Book 11", "x", "");
    tracker.set_rating(&id, 5);
    assert!(tracker.take_new_achievements().is_empty());
    assert_eq!(
        tracker
            .stats()
            .achievements
            .iter()
            .filter(|a| *a == "fiveStarFan")
            .count(),
        1
    );
}

#[test]
fn state_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let id = {
        let store = FileStore::open(dir.path()).unwrap();
        let mut tracker = Tracker::open(Box::new(store));

        let id = tracker.add_book("Dune", "Herbert", "sand");
        tracker.move_book(&id, Shelf::Wishlist, Shelf::Hangar);
        tracker.set_rating(&id, 3);
        tracker.set_yearly_goal(12);
        tracker.set_sort_order(Shelf::Hangar, SortOrder::RatingDescending);
        id
    };

    let store = FileStore::open(dir.path()).unwrap();
    let tracker = Tracker::open(Box::new(store));

    let (shelf, book) = tracker.find(&id).unwrap();
    assert_eq!(shelf, Shelf::Hangar);
    assert_eq!(book.title, "Dune");
    assert_eq!(book.notes, "sand");
    assert_eq!(book.rating, 3);

    assert_eq!(tracker.stats().yearly_goal, 12);
    assert_eq!(tracker.stats().total_books_moved_to_hangar, 1);
    assert_eq!(tracker.stats().rated_count(3), 1);
    assert_eq!(tracker.sort_order(Shelf::Hangar), SortOrder::RatingDescending);
}

#[test]
fn serde_roundtrip_preserves_collection() {
    let mut tracker = memory_tracker();
    for i in 0..5 {
        let id = tracker.add_book(format!("Book {}", i), format!("Author {}", i), "note");
        tracker.set_rating(&id, i);
    }

    let books = tracker.books(Shelf::Wishlist).to_vec();
    let json = serde_json::to_string(&books).unwrap();
    let parsed: Vec<starbooks::Book> = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.len(), 5);
    assert_eq!(parsed, books);
}

#[test]
fn corrupt_blobs_reset_to_defaults() {
    let store = MemoryStore::new();
    store.seed("holocronWishlist", b"not json at all".to_vec());
    store.seed("readingStats", b"{\"currentStreak\": \"yes\"}".to_vec());
    store.seed("archivesSortOrder", b"\"noSuchOrder\"".to_vec());

    let tracker = Tracker::open(Box::new(store));

    assert!(tracker.books(Shelf::Wishlist).is_empty());
    assert_eq!(tracker.stats(), &ReadingStats::default());
    assert_eq!(tracker.sort_order(Shelf::Archive), SortOrder::DefaultOrder);
}

#[test]
fn corrupt_blob_only_resets_its_own_key() {
    let dir = TempDir::new().unwrap();

    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut tracker = Tracker::open(Box::new(store));
        let id = tracker.add_book("Dune", "Herbert", "");
        tracker.move_book(&id, Shelf::Wishlist, Shelf::Hangar);
    }

    std::fs::write(dir.path().join("holocronWishlist.json"), b"garbage").unwrap();

    let store = FileStore::open(dir.path()).unwrap();
    let tracker = Tracker::open(Box::new(store));

    assert!(tracker.books(Shelf::Wishlist).is_empty());
    assert_eq!(tracker.books(Shelf::Hangar).len(), 1);
    assert_eq!(tracker.stats().total_books_moved_to_hangar, 1);
}

#[test]
fn dropped_write_keeps_memory_state() {
    struct ReadOnlyStore;

    impl BlobStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Option<Vec<u8>> {
            None
        }
        fn save(
            &self,
            key: &str,
            _bytes: &[u8],
        ) -> Result<(), starbooks::storage::StorageError> {
            Err(starbooks::storage::StorageError::Write {
                key: key.to_string(),
                source: anyhow::anyhow!("store is read-only"),
            })
        }
    }

    let mut tracker = Tracker::open(Box::new(ReadOnlyStore));

    // Saves fail, operations still complete on in-memory state.
    let id = tracker.add_book("Dune", "Herbert", "");
    assert!(tracker.move_book(&id, Shelf::Wishlist, Shelf::Hangar));
    assert_eq!(tracker.find(&id).unwrap().0, Shelf::Hangar);
    assert_eq!(tracker.stats().total_books_moved_to_hangar, 1);
}
