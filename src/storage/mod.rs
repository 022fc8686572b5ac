//! # Storage Layer
//!
//! Opaque key-value blob persistence for StarBooks.
//!
//! ## Persisted Keys
//!
//! | Key | Contents |
//! |-----|----------|
//! | `holocronWishlist` | JSON array of wishlist books |
//! | `inTheHangar` | JSON array of in-progress books |
//! | `jediArchives` | JSON array of completed books |
//! | `readingStats` | JSON [`ReadingStats`](crate::stats::ReadingStats) |
//! | `wishlistSortOrder` | JSON sort order for the wishlist |
//! | `hangarSortOrder` | JSON sort order for the hangar |
//! | `archivesSortOrder` | JSON sort order for the archive |
//!
//! ## Failure Semantics
//!
//! - Loads are fail-safe: a corrupt or missing blob yields the default
//!   value and a warning, never an error.
//! - A failed save is logged and dropped; in-memory state stays
//!   authoritative for the rest of the session.
//! - Writes are atomic (temp file + rename) with an exclusive lock.

mod kv;

pub use kv::{BlobStore, FileStore, MemoryStore, StorageError};
