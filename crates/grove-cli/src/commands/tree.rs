use grove_core::{stage, App, Database, GrowthStage};

/// Render the current tree from (level, category, color). This is the
/// rendering collaborator: a textual stand-in for the SVG canopy.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::init(Database::open()?);
    let session = app.session();
    let stage = stage(session.category(), session.level())?;
    render(stage);
    Ok(())
}

fn render(stage: &GrowthStage) {
    // Canopy widens one row per level, trunk underneath.
    for row in 0..stage.level {
        let indent = " ".repeat(usize::from(stage.level - row));
        let width = usize::from(row) * 2 + 1;
        println!("{indent}{}", stage.symbol.repeat(width));
    }
    let indent = " ".repeat(usize::from(stage.level));
    println!("{indent}|");
    println!("Level {} - {} ({})", stage.level, stage.name, stage.color);
}
