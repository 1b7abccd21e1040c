use clap::Subcommand;
use grove_core::{App, Database};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Show the active theme
    Show,
    /// Switch between dark and light
    Toggle,
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::init(Database::open()?);

    match action {
        ThemeAction::Show => println!("{}", app.theme().as_str()),
        ThemeAction::Toggle => println!("{}", app.toggle_theme().as_str()),
    }
    Ok(())
}
