//! Statistics and achievement CLI commands

use anyhow::Result;

use crate::stats::CATALOG;
use crate::tracker::Tracker;

use super::book::drain_achievements;
use super::output::Output;

pub fn show(tracker: &Tracker, output: &Output) -> Result<()> {
    let stats = tracker.stats();

    if output.is_json() {
        output.data(stats);
        return Ok(());
    }

    output.line("Reading stats");
    output.row(&["  Streak:", &stats.streak_description()]);
    output.row(&["  Longest streak:", &format!("{} days", stats.longest_streak)]);
    output.row(&["  Yearly goal:", &stats.yearly_goal_description()]);
    output.row(&["  Completed (total):", &stats.total_books_completed().to_string()]);
    output.row(&["  Rating:", &stats.average_rating_description()]);
    output.row(&["  Hangar time:", &stats.hangar_time_description()]);

    if !stats.books_completed_by_year.is_empty() {
        output.blank();
        output.line("Completed by year");
        for (year, count) in &stats.books_completed_by_year {
            output.row(&[&format!("  {}", year), &count.to_string()]);
        }
    }

    if !stats.rating_distribution.is_empty() {
        output.blank();
        output.line("Rating distribution");
        for (rating, count) in stats.rating_distribution.iter().rev() {
            output.row(&[&format!("  {}", super::book::stars(*rating)), &count.to_string()]);
        }
    }

    Ok(())
}

pub fn goal(tracker: &mut Tracker, output: &Output, goal: u32) -> Result<()> {
    tracker.set_yearly_goal(goal);
    let unlocked = drain_achievements(tracker, output);

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "yearlyGoal": goal,
            "newAchievements": unlocked,
        }));
    } else if goal == 0 {
        output.success("Yearly goal cleared");
    } else {
        output.success(&format!("Yearly goal set to {} books", goal));
    }
    Ok(())
}

pub fn achievements(tracker: &Tracker, output: &Output) -> Result<()> {
    let earned = &tracker.stats().achievements;

    if output.is_json() {
        let entries: Vec<serde_json::Value> = CATALOG
            .iter()
            .map(|def| {
                serde_json::json!({
                    "id": def.id.to_string(),
                    "title": def.title,
                    "description": def.description,
                    "icon": def.icon,
                    "earned": earned.contains(def.id.as_str()),
                })
            })
            .collect();
        output.data(&entries);
        return Ok(());
    }

    output.line(&format!("Achievements ({}/{})", earned.len(), CATALOG.len()));
    for def in CATALOG {
        let mark = if earned.contains(def.id.as_str()) {
            "[x]"
        } else {
            "[ ]"
        };
        output.row(&[&format!("  {}", mark), def.title, def.description]);
    }
    Ok(())
}
