use clap::Subcommand;
use grove_core::{App, Category, Database};

use crate::observer;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a focus session
    Start {
        /// Session category: study, work, creative, exercise
        #[arg(long)]
        category: Option<String>,
    },
    /// Toggle between running and paused
    Pause,
    /// Abandon the current session without recording it
    Reset,
    /// Advance the clock by N seconds (scripting driver)
    Tick {
        #[arg(default_value = "1")]
        seconds: u64,
    },
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::init(Database::open()?);

    match action {
        TimerAction::Start { category } => {
            if let Some(raw) = category {
                let category: Category = raw.parse()?;
                if !app.set_category(category) {
                    observer::notify("category is locked while a session is active");
                }
            }
            match app.start() {
                Some(event) => observer::report(&[event], app.settings()),
                None => observer::notify("session already active"),
            }
            app.save_all();
        }
        TimerAction::Pause => {
            match app.toggle_pause() {
                Some(event) => observer::report(&[event], app.settings()),
                None => observer::notify("no active session"),
            }
            app.save_all();
        }
        TimerAction::Reset => {
            match app.reset() {
                Some(event) => observer::report(&[event], app.settings()),
                None => observer::notify("no active session"),
            }
            app.save_all();
        }
        TimerAction::Tick { seconds } => {
            let mut events = Vec::new();
            for _ in 0..seconds {
                events.extend(app.tick());
            }
            observer::report(&events, app.settings());
            app.save_all();
            println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
        }
    }
    Ok(())
}
