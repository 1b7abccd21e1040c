use clap::Subcommand;
use grove_core::{App, Database};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's counters and the lifetime tree total
    Show,
    /// Achievement progress
    Achievements,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::init(Database::open()?);

    match action {
        StatsAction::Show => {
            println!("{}", serde_json::to_string_pretty(app.stats())?);
        }
        StatsAction::Achievements => {
            println!("{}", serde_json::to_string_pretty(&app.achievements())?);
        }
    }
    Ok(())
}
