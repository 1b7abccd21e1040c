use clap::Subcommand;
use grove_core::{App, Category, Database, ScheduleEntry, ValidationError};

use crate::observer;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// List entries with their indexes
    List,
    /// Add a recurring entry
    Add {
        /// Session category: study, work, creative, exercise
        #[arg(long)]
        category: String,
        /// Time of day as "HH:MM"
        #[arg(long)]
        time: String,
        /// Comma-separated days: sun,mon,... or 0-6 (0 = Sun)
        #[arg(long)]
        days: String,
    },
    /// Remove the entry at INDEX
    Remove { index: usize },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::init(Database::open()?);

    match action {
        ScheduleAction::List => {
            println!("{}", serde_json::to_string_pretty(app.schedule())?);
        }
        ScheduleAction::Add { category, time, days } => {
            let category: Category = category.parse()?;
            let entry = ScheduleEntry {
                category,
                time_of_day: time,
                days: parse_days(&days)?,
            };
            // A rejected form surfaces a warning, not a failure.
            match app.add_schedule_entry(entry) {
                Ok(()) => observer::notify("\u{1F4C5} Schedule saved!"),
                Err(ValidationError::InvalidValue { .. } | ValidationError::EmptyCollection(_)) => {
                    observer::notify("\u{26A0} Please select time and days");
                }
                Err(e) => return Err(e.into()),
            }
        }
        ScheduleAction::Remove { index } => {
            let removed = app.remove_schedule_entry(index)?;
            observer::notify(&format!(
                "removed {} at {}",
                removed.category, removed.time_of_day
            ));
        }
    }
    Ok(())
}

/// Parse "mon,tue" or "1,2" into the 0 = Sun .. 6 = Sat encoding.
/// An empty string parses to an empty set, which the planner rejects.
fn parse_days(raw: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| day_index(part.trim()))
        .collect()
}

fn day_index(day: &str) -> Result<u8, Box<dyn std::error::Error>> {
    if let Ok(n) = day.parse::<u8>() {
        if n <= 6 {
            return Ok(n);
        }
        return Err(format!("day index {n} out of range 0-6").into());
    }
    let index = match day.to_ascii_lowercase().as_str() {
        "sun" | "sunday" => 0,
        "mon" | "monday" => 1,
        "tue" | "tuesday" => 2,
        "wed" | "wednesday" => 3,
        "thu" | "thursday" => 4,
        "fri" | "friday" => 5,
        "sat" | "saturday" => 6,
        other => return Err(format!("unknown day: {other}").into()),
    };
    Ok(index)
}
