//! Daily statistics and achievement evaluation.
//!
//! Three counters reset once per new local calendar date; `total_trees`
//! is lifetime cumulative and survives the rollover. The asymmetry is
//! deliberate: the forest keeps growing even though each day starts
//! fresh.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyStats {
    pub focus_minutes: u64,
    pub sessions_completed: u64,
    pub trees_grown: u64,
    /// Lifetime total, never reset by the daily rollover.
    pub total_trees: u64,
}

impl DailyStats {
    /// Zero the daily counters when the calendar date has changed since
    /// the last recorded session. Must run once at startup before any
    /// other read of statistics. Returns whether a rollover happened,
    /// in which case the caller records `today` as the new last-seen
    /// date.
    pub fn rollover_if_new_day(&mut self, last_seen: Option<NaiveDate>, today: NaiveDate) -> bool {
        if last_seen == Some(today) {
            return false;
        }
        self.focus_minutes = 0;
        self.sessions_completed = 0;
        self.trees_grown = 0;
        true
    }

    /// Record one completed focus session. At-least-once: if a later
    /// persistence write fails the in-memory increment stands.
    pub fn record_completion(&mut self, focus_minutes: u32) {
        self.focus_minutes += u64::from(focus_minutes);
        self.sessions_completed += 1;
        self.trees_grown += 1;
        self.total_trees += 1;
    }
}

/// A fixed achievement evaluated against the current statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// Evaluate the fixed achievement set. The last two have no tracked
/// inputs (multi-day streaks and per-category totals are not recorded)
/// and stay locked.
pub fn achievements(stats: &DailyStats) -> Vec<Achievement> {
    vec![
        Achievement {
            id: "first",
            name: "First Tree",
            description: "Grow your first tree",
            unlocked: stats.trees_grown > 0,
        },
        Achievement {
            id: "ten_trees",
            name: "10 Trees",
            description: "Grow 10 trees",
            unlocked: stats.total_trees >= 10,
        },
        Achievement {
            id: "marathon",
            name: "Marathon",
            description: "Focus for 2+ hours",
            unlocked: stats.focus_minutes >= 120,
        },
        Achievement {
            id: "every_day",
            name: "Every Day",
            description: "Session every day for 7 days",
            unlocked: false,
        },
        Achievement {
            id: "creative",
            name: "Creative",
            description: "Grow 5 creative trees",
            unlocked: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn record_completion_arithmetic() {
        let mut stats = DailyStats::default();
        for _ in 0..3 {
            stats.record_completion(25);
        }
        assert_eq!(stats.focus_minutes, 75);
        assert_eq!(stats.sessions_completed, 3);
        assert_eq!(stats.trees_grown, 3);
        assert_eq!(stats.total_trees, 3);
    }

    #[test]
    fn rollover_resets_daily_but_not_total() {
        let mut stats = DailyStats {
            focus_minutes: 50,
            sessions_completed: 2,
            trees_grown: 2,
            total_trees: 17,
        };
        assert!(stats.rollover_if_new_day(Some(date(2026, 8, 5)), date(2026, 8, 6)));
        assert_eq!(stats.focus_minutes, 0);
        assert_eq!(stats.sessions_completed, 0);
        assert_eq!(stats.trees_grown, 0);
        assert_eq!(stats.total_trees, 17);
    }

    #[test]
    fn rollover_same_day_is_a_no_op() {
        let mut stats = DailyStats {
            focus_minutes: 50,
            sessions_completed: 2,
            trees_grown: 2,
            total_trees: 17,
        };
        assert!(!stats.rollover_if_new_day(Some(date(2026, 8, 6)), date(2026, 8, 6)));
        assert_eq!(stats.focus_minutes, 50);
        assert_eq!(stats.sessions_completed, 2);
    }

    #[test]
    fn rollover_with_no_last_date_resets() {
        let mut stats = DailyStats {
            focus_minutes: 10,
            sessions_completed: 1,
            trees_grown: 1,
            total_trees: 1,
        };
        assert!(stats.rollover_if_new_day(None, date(2026, 8, 6)));
        assert_eq!(stats.sessions_completed, 0);
        assert_eq!(stats.total_trees, 1);
    }

    #[test]
    fn achievements_unlock_from_stats() {
        let locked = achievements(&DailyStats::default());
        assert!(locked.iter().all(|a| !a.unlocked));

        let stats = DailyStats {
            focus_minutes: 150,
            sessions_completed: 6,
            trees_grown: 6,
            total_trees: 12,
        };
        let unlocked = achievements(&stats);
        assert!(unlocked.iter().find(|a| a.id == "first").unwrap().unlocked);
        assert!(unlocked.iter().find(|a| a.id == "ten_trees").unwrap().unlocked);
        assert!(unlocked.iter().find(|a| a.id == "marathon").unwrap().unlocked);
        assert!(!unlocked.iter().find(|a| a.id == "every_day").unwrap().unlocked);
    }
}
