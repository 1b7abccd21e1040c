use chrono::{Local, NaiveDate};
use clap::Subcommand;
use grove_core::{App, Database};

use crate::observer;

#[derive(Subcommand)]
pub enum NotesAction {
    /// Save a note for a day (today unless --date is given)
    Set {
        text: String,
        /// Date as "YYYY-MM-DD"
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a day's note
    Show {
        /// Date as "YYYY-MM-DD"
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: NotesAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::init(Database::open()?);

    match action {
        NotesAction::Set { text, date } => {
            app.set_note(resolve_date(date)?, text);
            observer::notify("\u{1F4DD} Notes saved!");
        }
        NotesAction::Show { date } => match app.note(resolve_date(date)?) {
            Some(text) => println!("{text}"),
            None => observer::notify("no note for that day"),
        },
    }
    Ok(())
}

fn resolve_date(raw: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match raw {
        Some(s) => Ok(NaiveDate::parse_from_str(&s, "%Y-%m-%d")?),
        None => Ok(Local::now().date_naive()),
    }
}
