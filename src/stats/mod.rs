//! Reading statistics and achievements
//!
//! The engine consumes lifecycle events from the library and maintains the
//! derived [`ReadingStats`] aggregate; the achievement evaluator runs after
//! every stats mutation.

mod achievements;
mod engine;
mod model;

pub use achievements::{evaluate, AchievementDef, AchievementId, CATALOG};
pub use engine::StatsEngine;
pub use model::{month_label, year_label, ReadingStats};
