//! Recurring session schedules.
//!
//! Entries pair a category with a time of day (`"HH:MM"`) and a set of
//! weekdays, encoded `0 = Sun .. 6 = Sat`. Evaluation is an exact string
//! match against the current minute, polled once every sixty seconds.
//! Duplicate entries are permitted; each matching entry is due on its
//! own.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::growth::Category;

/// Seconds between schedule evaluations. Entries carry minute
/// resolution, so polling finer than this buys nothing.
pub const POLL_INTERVAL_SECS: u64 = 60;

/// One recurring schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub category: Category,
    /// Time of day as "HH:MM".
    pub time_of_day: String,
    /// Weekdays this entry applies to, 0 = Sun .. 6 = Sat.
    pub days: Vec<u8>,
}

impl ScheduleEntry {
    /// Reject entries a user form must not persist: an empty time or an
    /// empty day set.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_of_day.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "time_of_day".to_string(),
                message: "time must be selected".to_string(),
            });
        }
        if self.days.is_empty() {
            return Err(ValidationError::EmptyCollection("days".to_string()));
        }
        Ok(())
    }

    /// Whether this entry matches the given instant's weekday and minute.
    pub fn matches(&self, at: NaiveDateTime) -> bool {
        let day = at.weekday().num_days_from_sunday() as u8;
        self.days.contains(&day) && self.time_of_day == format_time_of_day(at)
    }
}

/// `"HH:MM"` for an instant, the form entries store.
pub fn format_time_of_day(at: NaiveDateTime) -> String {
    format!("{:02}:{:02}", at.hour(), at.minute())
}

/// `"YYYY-MM-DD HH:MM"` identifying the evaluated minute, used to
/// suppress a double fire when two polls land inside the same minute.
pub fn minute_key(at: NaiveDateTime) -> String {
    format!("{} {}", at.date().format("%Y-%m-%d"), format_time_of_day(at))
}

/// All entries due at the given instant, in entry order.
pub fn due(entries: &[ScheduleEntry], at: NaiveDateTime) -> Vec<&ScheduleEntry> {
    entries.iter().filter(|e| e.matches(at)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn monday_nine() -> ScheduleEntry {
        ScheduleEntry {
            category: Category::Work,
            time_of_day: "09:00".to_string(),
            days: vec![1],
        }
    }

    #[test]
    fn fires_on_matching_day_and_minute() {
        let entries = vec![monday_nine()];
        // 2026-08-03 is a Monday.
        assert_eq!(due(&entries, at(2026, 8, 3, 9, 0)).len(), 1);
    }

    #[test]
    fn silent_on_wrong_minute_or_day() {
        let entries = vec![monday_nine()];
        assert!(due(&entries, at(2026, 8, 3, 9, 1)).is_empty());
        // Tuesday at the right time.
        assert!(due(&entries, at(2026, 8, 4, 9, 0)).is_empty());
    }

    #[test]
    fn duplicates_each_fire() {
        let entries = vec![monday_nine(), monday_nine()];
        assert_eq!(due(&entries, at(2026, 8, 3, 9, 0)).len(), 2);
    }

    #[test]
    fn validate_rejects_empty_fields() {
        let mut entry = monday_nine();
        entry.time_of_day.clear();
        assert!(entry.validate().is_err());

        let mut entry = monday_nine();
        entry.days.clear();
        assert!(entry.validate().is_err());

        assert!(monday_nine().validate().is_ok());
    }

    #[test]
    fn minute_key_identifies_the_minute() {
        assert_eq!(minute_key(at(2026, 8, 3, 9, 0)), "2026-08-03 09:00");
        assert_ne!(minute_key(at(2026, 8, 3, 9, 0)), minute_key(at(2026, 8, 3, 9, 1)));
    }
}
