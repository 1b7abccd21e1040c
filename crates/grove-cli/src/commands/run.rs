//! Foreground driver loop.
//!
//! One task owns the application and multiplexes three cadences: the
//! one-second clock tick, the once-per-minute schedule poll, and the
//! thirty-second autosave. Ctrl-C performs the final save. Because the
//! clock only advances inside this loop, pausing or resetting leaves no
//! stray driver behind.

use std::io::Write;
use std::time::Duration;

use grove_core::planner::POLL_INTERVAL_SECS;
use grove_core::state::AUTOSAVE_INTERVAL_SECS;
use grove_core::{App, Database};

use crate::observer;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::init(Database::open()?);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(drive(&mut app))
}

async fn drive(app: &mut App<Database>) -> Result<(), Box<dyn std::error::Error>> {
    let period = Duration::from_secs(1);
    let start = tokio::time::Instant::now();
    let mut tick = tokio::time::interval_at(start + period, period);
    let mut poll = tokio::time::interval_at(
        start + Duration::from_secs(POLL_INTERVAL_SECS),
        Duration::from_secs(POLL_INTERVAL_SECS),
    );
    let mut autosave = tokio::time::interval_at(
        start + Duration::from_secs(AUTOSAVE_INTERVAL_SECS),
        Duration::from_secs(AUTOSAVE_INTERVAL_SECS),
    );
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    observer::notify("grove is running; ctrl-c to stop");
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let events = app.tick();
                if !events.is_empty() {
                    println!();
                }
                observer::report(&events, app.settings());
                print_status_line(app);
            }
            _ = poll.tick() => {
                let now = chrono::Local::now().naive_local();
                let events = app.poll_schedule(now);
                observer::report(&events, app.settings());
                app.record_presence("grove", true);
            }
            _ = autosave.tick() => {
                app.save_all();
            }
            _ = &mut shutdown => {
                app.shutdown();
                println!();
                break;
            }
        }
    }
    Ok(())
}

fn print_status_line(app: &App<Database>) {
    let session = app.session();
    if !session.active() {
        return;
    }
    let remaining = session.remaining_secs(app.settings());
    print!(
        "\r{:02}:{:02}  level {}  {}",
        remaining / 60,
        remaining % 60,
        session.level(),
        if session.paused() { "(paused)" } else { "        " },
    );
    let _ = std::io::stdout().flush();
}
