//! Collection store
//!
//! The [`Library`] owns the three ordered shelves and performs every
//! cross-shelf transition, emitting explicit [`LifecycleEvent`]s for the
//! stats engine to consume.

mod event;
mod library;

pub use event::LifecycleEvent;
pub use library::Library;
