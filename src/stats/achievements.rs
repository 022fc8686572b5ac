//! Achievement catalog and evaluator
//!
//! A fixed table of milestones, each pairing display metadata with an
//! earned-predicate over [`ReadingStats`]. Evaluation only ever consults
//! predicates for achievements that are not yet earned; once an identifier
//! lands in the earned set it stays there for good.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::model::ReadingStats;

/// Identifier of a catalog achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementId {
    FirstBook,
    Streak7,
    Streak30,
    Streak100,
    Books10,
    Books50,
    Books100,
    PerfectRater,
    CriticRater,
    YearlyGoalMet,
    FiveStarFan,
    SpeedReader,
    SlowAndSteady,
}

impl AchievementId {
    /// The stable string form stored in the earned set
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstBook => "firstBook",
            AchievementId::Streak7 => "streak7",
            AchievementId::Streak30 => "streak30",
            AchievementId::Streak100 => "streak100",
            AchievementId::Books10 => "books10",
            AchievementId::Books50 => "books50",
            AchievementId::Books100 => "books100",
            AchievementId::PerfectRater => "perfectRater",
            AchievementId::CriticRater => "criticRater",
            AchievementId::YearlyGoalMet => "yearlyGoalMet",
            AchievementId::FiveStarFan => "fiveStarFan",
            AchievementId::SpeedReader => "speedReader",
            AchievementId::SlowAndSteady => "slowAndSteady",
        }
    }

    /// Catalog entry for this achievement
    pub fn definition(&self) -> &'static AchievementDef {
        CATALOG
            .iter()
            .find(|def| def.id == *self)
            .expect("every AchievementId has a catalog entry")
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .map(|def| def.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown achievement id: {}", s))
    }
}

/// A catalog entry: identifier, display metadata, and earned-predicate
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub earned: fn(&ReadingStats, DateTime<Utc>) -> bool,
}

/// The fixed achievement catalog, iterated explicitly during evaluation
pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstBook,
        title: "First Book Completed",
        description: "Completed your first book!",
        icon: "book",
        earned: |stats, _| stats.current_year_books_read >= 1 || stats.total_books_completed() >= 1,
    },
    AchievementDef {
        id: AchievementId::Streak7,
        title: "7-Day Reading Streak",
        description: "Read for 7 days in a row!",
        icon: "flame",
        earned: |stats, _| stats.current_streak >= 7,
    },
    AchievementDef {
        id: AchievementId::Streak30,
        title: "30-Day Reading Streak",
        description: "Read for 30 days in a row!",
        icon: "flame",
        earned: |stats, _| stats.current_streak >= 30,
    },
    AchievementDef {
        id: AchievementId::Streak100,
        title: "100-Day Reading Streak",
        description: "Read for 100 days in a row!",
        icon: "flame",
        earned: |stats, _| stats.current_streak >= 100,
    },
    AchievementDef {
        id: AchievementId::Books10,
        title: "10 Books Read",
        description: "Completed 10 books!",
        icon: "books",
        earned: |stats, _| stats.total_books_completed() >= 10,
    },
    AchievementDef {
        id: AchievementId::Books50,
        title: "50 Books Read",
        description: "Completed 50 books!",
        icon: "books",
        earned: |stats, _| stats.total_books_completed() >= 50,
    },
    AchievementDef {
        id: AchievementId::Books100,
        title: "100 Books Read",
        description: "Completed 100 books!",
        icon: "books",
        earned: |stats, _| stats.total_books_completed() >= 100,
    },
    AchievementDef {
        id: AchievementId::PerfectRater,
        title: "Rated 10 Books",
        description: "Rated 10 books!",
        icon: "star",
        earned: |stats, _| stats.total_rated_books >= 10,
    },
    AchievementDef {
        id: AchievementId::CriticRater,
        title: "Rated 50 Books",
        description: "Rated 50 books!",
        icon: "star",
        earned: |stats, _| stats.total_rated_books >= 50,
    },
    AchievementDef {
        id: AchievementId::YearlyGoalMet,
        title: "Yearly Goal Achieved",
        description: "Met your yearly reading goal!",
        icon: "target",
        earned: |stats, _| {
            stats.yearly_goal > 0 && stats.current_year_books_read >= stats.yearly_goal
        },
    },
    AchievementDef {
        id: AchievementId::FiveStarFan,
        title: "10 Five-Star Books",
        description: "Gave 5 stars to 10 books!",
        icon: "heart",
        earned: |stats, _| stats.rated_count(5) >= 10,
    },
    AchievementDef {
        id: AchievementId::SpeedReader,
        title: "Completed Book in 1 Day",
        description: "Finished a book in one day!",
        icon: "bolt",
        // Dormant: the completion path records no same-day entry/finish
        // window, so there is nothing to evaluate against.
        earned: |_, _| false,
    },
    AchievementDef {
        id: AchievementId::SlowAndSteady,
        title: "Book in Hangar for 30+ Days",
        description: "Kept a book in the hangar for 30+ days!",
        icon: "tortoise",
        earned: |stats, now| {
            stats
                .hangar_entry_dates
                .values()
                .any(|entered| (now - *entered).num_days() >= 30)
        },
    },
];

/// Scans the catalog against current stats and records anything newly
/// earned.
///
/// Already-earned achievements are skipped and can never be revoked, even
/// if their predicate would no longer hold. Returns the newly earned IDs in
/// catalog order.
pub fn evaluate(stats: &mut ReadingStats, now: DateTime<Utc>) -> Vec<AchievementId> {
    let mut newly_earned = Vec::new();

    for def in CATALOG {
        if stats.achievements.contains(def.id.as_str()) {
            continue;
        }
        if (def.earned)(stats, now) {
            stats.achievements.insert(def.id.as_str().to_string());
            newly_earned.push(def.id);
        }
    }

    newly_earned
}
