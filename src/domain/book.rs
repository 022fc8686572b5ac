//! Book domain model
//!
//! A book is a plain record; all lifecycle mutation goes through the
//! [`Library`](crate::store::Library). Two books are the same entity iff
//! their IDs match, regardless of attribute edits.

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::BookId;

/// Highest allowed star rating
pub const MAX_RATING: u8 = 5;

/// Clamps an arbitrary rating input into the valid 0-5 range.
///
/// Out-of-range input is never rejected, only clamped.
pub fn clamp_rating(value: i64) -> u8 {
    value.clamp(0, MAX_RATING as i64) as u8
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    // Persisted blobs may predate clamping; clamp on the way in too.
    let raw = i64::deserialize(deserializer)?;
    Ok(clamp_rating(raw))
}

/// A tracked book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, assigned at creation
    pub id: BookId,

    /// Book title
    pub title: String,

    /// Book author
    pub author: String,

    /// Free-form reader notes
    #[serde(default)]
    pub notes: String,

    /// Star rating, 0 (unrated) to 5
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: u8,
}

impl Book {
    /// Creates a new book with a fresh ID, empty notes, and no rating
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: BookId::new(&title, Utc::now()),
            title,
            author: author.into(),
            notes: String::new(),
            rating: 0,
        }
    }

    /// Sets the notes text
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns true if the book has been rated
    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }

    /// Overwrites the rating, clamping into the valid range
    pub fn set_rating(&mut self, rating: i64) {
        self.rating = clamp_rating(rating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_defaults() {
        let book = Book::new("Dune", "Herbert");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.notes, "");
        assert_eq!(book.rating, 0);
        assert!(!book.is_rated());
    }

    #[test]
    fn clamp_law() {
        assert_eq!(clamp_rating(-1), 0);
        assert_eq!(clamp_rating(0), 0);
        assert_eq!(clamp_rating(3), 3);
        assert_eq!(clamp_rating(5), 5);
        assert_eq!(clamp_rating(6), 5);
        assert_eq!(clamp_rating(i64::MAX), 5);
        assert_eq!(clamp_rating(i64::MIN), 0);
    }

    #[test]
    fn set_rating_clamps() {
        let mut book = Book::new("Dune", "Herbert");
        book.set_rating(99);
        assert_eq!(book.rating, 5);
        book.set_rating(-3);
        assert_eq!(book.rating, 0);
    }

    #[test]
    fn identity_survives_attribute_edits() {
        let book = Book::new("Dune", "Herbert");
        let mut edited = book.clone();
        edited.title = "Dune Messiah".to_string();
        edited.rating = 4;
        assert_eq!(book.id, edited.id);

        let other = Book::new("Dune", "Herbert");
        assert_ne!(book.id, other.id);
    }

    #[test]
    fn serde_roundtrip() {
        let book = Book::new("Dune", "Herbert").with_notes("A classic");
        let json = serde_json::to_string(&book).unwrap();
        let parsed: Book = serde_json::from_str(&json).unwrap();

        assert_eq!(book, parsed);
        assert_eq!(book.id, parsed.id);
    }

    #[test]
    fn serde_field_names() {
        let book = Book::new("Dune", "Herbert");
        let value = serde_json::to_value(&book).unwrap();
        let obj = value.as_object().unwrap();

        for field in ["id", "title", "author", "notes", "rating"] {
            assert!(obj.contains_key(field), "missing field {}", field);
        }
        assert!(obj["id"].is_string());
        assert!(obj["rating"].is_u64());
    }

    #[test]
    fn deserialize_clamps_out_of_range_rating() {
        let book = Book::new("Dune", "Herbert");
        let json = format!(
            r#"{{"id":"{}","title":"Dune","author":"Herbert","notes":"","rating":9}}"#,
            book.id
        );
        let parsed: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rating, 5);
    }

    #[test]
    fn deserialize_defaults_missing_fields() {
        let book = Book::new("Dune", "Herbert");
        let json = format!(r#"{{"id":"{}","title":"Dune","author":"Herbert"}}"#, book.id);
        let parsed: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.notes, "");
        assert_eq!(parsed.rating, 0);
    }
}
