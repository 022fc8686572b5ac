//! Book and shelf CLI commands

use anyhow::{bail, Result};

use crate::domain::{Book, BookId, FilterOption, Shelf, SortOrder};
use crate::tracker::Tracker;

use super::output::Output;

/// Renders a rating as stars, or a dash when unrated
pub fn stars(rating: u8) -> String {
    if rating == 0 {
        "-".to_string()
    } else {
        "*".repeat(rating as usize)
    }
}

/// Resolves user input to a tracked book's ID.
///
/// Accepts a full ID (`b-7f2b4c1`) or a unique prefix of one.
pub fn resolve_id(tracker: &Tracker, input: &str) -> Result<BookId> {
    if let Ok(id) = input.parse::<BookId>() {
        if tracker.find(&id).is_some() {
            return Ok(id);
        }
        bail!("Book not found: {}", id);
    }

    let matches: Vec<BookId> = Shelf::ALL
        .iter()
        .flat_map(|&shelf| tracker.books(shelf))
        .filter(|b| b.id.to_string().starts_with(input))
        .map(|b| b.id.clone())
        .collect();

    match matches.len() {
        0 => bail!("Book not found: {}", input),
        1 => Ok(matches.into_iter().next().expect("one match")),
        n => bail!("Ambiguous book ID '{}' ({} matches)", input, n),
    }
}

fn book_json(book: &Book, shelf: Shelf) -> serde_json::Value {
    serde_json::json!({
        "id": book.id.to_string(),
        "title": book.title,
        "author": book.author,
        "notes": book.notes,
        "rating": book.rating,
        "shelf": shelf.label(),
    })
}

/// Prints any achievements unlocked by the last operation (text mode);
/// returns them as JSON values for structured output.
pub fn drain_achievements(tracker: &mut Tracker, output: &Output) -> Vec<serde_json::Value> {
    tracker
        .take_new_achievements()
        .into_iter()
        .map(|id| {
            let def = id.definition();
            output.line(&format!("Achievement unlocked: {} - {}", def.title, def.description));
            serde_json::json!({
                "id": id.to_string(),
                "title": def.title,
                "description": def.description,
                "icon": def.icon,
            })
        })
        .collect()
}

pub fn add(
    tracker: &mut Tracker,
    output: &Output,
    title: &str,
    author: &str,
    notes: Option<&str>,
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Title must not be empty");
    }

    let id = tracker.add_book(title, author, notes.unwrap_or(""));
    output.verbose(&format!("added {} to wishlist", id));

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "id": id.to_string(),
            "shelf": Shelf::Wishlist.label(),
        }));
    } else {
        output.success(&format!("Added \"{}\" to the wishlist ({})", title, id));
    }
    Ok(())
}

pub fn list(
    tracker: &Tracker,
    output: &Output,
    shelf: Option<Shelf>,
    filter: FilterOption,
) -> Result<()> {
    let shelves: Vec<Shelf> = match shelf {
        Some(s) => vec![s],
        None => Shelf::ALL.to_vec(),
    };

    if output.is_json() {
        let mut sections = serde_json::Map::new();
        for shelf in &shelves {
            let books: Vec<serde_json::Value> = filter
                .apply(tracker.sorted_books(*shelf))
                .into_iter()
                .map(|b| book_json(b, *shelf))
                .collect();
            sections.insert(shelf.label().to_string(), serde_json::Value::Array(books));
        }
        output.data(&serde_json::Value::Object(sections));
        return Ok(());
    }

    for (i, shelf) in shelves.iter().enumerate() {
        if i > 0 {
            output.blank();
        }
        let order = tracker.sort_order(*shelf);
        let books = filter.apply(tracker.sorted_books(*shelf));

        output.line(&format!("{} ({}) [{}]", shelf.label(), books.len(), order));
        if books.is_empty() {
            output.line("  (empty)");
            continue;
        }
        for book in books {
            output.row(&[
                &format!("  {}", book.id),
                &book.title,
                &book.author,
                &stars(book.rating),
            ]);
        }
    }
    Ok(())
}

pub fn show(tracker: &Tracker, output: &Output, id_input: &str) -> Result<()> {
    let id = resolve_id(tracker, id_input)?;
    let (shelf, book) = tracker.find(&id).expect("resolved id is tracked");

    if output.is_json() {
        output.data(&book_json(book, shelf));
        return Ok(());
    }

    output.row(&["ID:", &book.id.to_string()]);
    output.row(&["Title:", &book.title]);
    output.row(&["Author:", &book.author]);
    output.row(&["Shelf:", shelf.label()]);
    output.row(&["Rating:", &stars(book.rating)]);
    if !book.notes.is_empty() {
        output.row(&["Notes:", &book.notes]);
    }
    Ok(())
}

pub fn edit(
    tracker: &mut Tracker,
    output: &Output,
    id_input: &str,
    title: Option<String>,
    author: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let id = resolve_id(tracker, id_input)?;
    let (_, book) = tracker.find(&id).expect("resolved id is tracked");

    let title = title.unwrap_or_else(|| book.title.clone());
    let author = author.unwrap_or_else(|| book.author.clone());
    let notes = notes.unwrap_or_else(|| book.notes.clone());

    if title.trim().is_empty() {
        bail!("Title must not be empty");
    }

    tracker.edit_book(&id, title, author, notes);
    output.success(&format!("Updated {}", id));
    Ok(())
}

/// Runs one shelf transition, announcing any unlocked achievements
pub fn transition(
    tracker: &mut Tracker,
    output: &Output,
    id_input: &str,
    from: Shelf,
    to: Shelf,
    done: &str,
) -> Result<()> {
    let id = resolve_id(tracker, id_input)?;

    if !tracker.move_book(&id, from, to) {
        let shelf = tracker.find(&id).map(|(s, _)| s).expect("resolved id is tracked");
        bail!("Book {} is on the {}, not the {}", id, shelf.label(), from.label());
    }

    let (_, book) = tracker.find(&id).expect("moved book is tracked");
    let title = book.title.clone();
    let unlocked = drain_achievements(tracker, output);

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "id": id.to_string(),
            "from": from.label(),
            "to": to.label(),
            "newAchievements": unlocked,
        }));
    } else {
        output.success(&format!("{} \"{}\"", done, title));
    }
    Ok(())
}

pub fn rate(tracker: &mut Tracker, output: &Output, id_input: &str, rating: i64) -> Result<()> {
    let id = resolve_id(tracker, id_input)?;
    tracker.set_rating(&id, rating);

    let (_, book) = tracker.find(&id).expect("resolved id is tracked");
    let applied = book.rating;
    let title = book.title.clone();
    let unlocked = drain_achievements(tracker, output);

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "id": id.to_string(),
            "rating": applied,
            "newAchievements": unlocked,
        }));
    } else {
        output.success(&format!("Rated \"{}\" {}", title, stars(applied)));
    }
    Ok(())
}

pub fn delete(
    tracker: &mut Tracker,
    output: &Output,
    shelf: Shelf,
    id_inputs: &[String],
) -> Result<()> {
    let mut ids = Vec::with_capacity(id_inputs.len());
    for input in id_inputs {
        ids.push(resolve_id(tracker, input)?);
    }

    let removed = tracker.delete(shelf, &ids);
    if removed == 0 {
        bail!("No matching books on the {}", shelf.label());
    }
    output.success(&format!("Deleted {} book(s) from the {}", removed, shelf.label()));
    Ok(())
}

pub fn reorder(
    tracker: &mut Tracker,
    output: &Output,
    shelf: Shelf,
    from: &[usize],
    to: usize,
) -> Result<()> {
    if !tracker.reorder(shelf, from, to) {
        bail!("Invalid positions for the {} (it has {} books)", shelf.label(), tracker.books(shelf).len());
    }
    output.success(&format!("Reordered the {}", shelf.label()));
    Ok(())
}

pub fn sort(
    tracker: &mut Tracker,
    output: &Output,
    shelf: Shelf,
    order: Option<SortOrder>,
) -> Result<()> {
    match order {
        None => {
            let current = tracker.sort_order(shelf);
            if output.is_json() {
                output.data(&serde_json::json!({
                    "shelf": shelf.label(),
                    "sortOrder": current,
                }));
            } else {
                output.line(&format!("{}: {}", shelf.label(), current));
            }
        }
        Some(order) => {
            if !tracker.set_sort_order(shelf, order) {
                bail!("Sort order '{}' is not available for the {}", order, shelf.label());
            }
            output.success(&format!("{} now sorted by {}", shelf.label(), order));
        }
    }
    Ok(())
}
