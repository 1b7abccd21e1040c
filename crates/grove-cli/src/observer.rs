//! Maps core events to user-facing notifications. The only place the
//! CLI decides what to say and when to chirp; the core never prints.

use std::io::Write;

use grove_core::{Event, Settings};

pub fn report(events: &[Event], settings: &Settings) {
    for event in events {
        match event {
            Event::SessionStarted { .. } => notify("\u{1F331} Focus session started!"),
            Event::SessionPaused { .. } => notify("Session paused"),
            Event::SessionResumed { .. } => notify("Session resumed"),
            Event::SessionReset { .. } => notify("Session reset"),
            Event::SessionCompleted { .. } => {
                notify("\u{1F333} Session complete! Tree grown!");
                play_cue();
            }
            Event::MilestoneReached { hours, .. } => {
                notify(&format!(
                    "\u{23F0} You've been focusing for {hours} hours!"
                ));
                if settings.sound_enabled {
                    play_cue();
                }
            }
            Event::TreeLeveled { level, .. } => {
                notify(&format!("\u{1F33F} Tree reached level {level}"));
            }
            Event::ScheduleDue { category, .. } => {
                notify(&format!("\u{23F0} Time for your {category} session!"));
                if settings.sound_enabled {
                    play_cue();
                }
            }
            Event::StateSnapshot { .. } => {}
        }
    }
}

pub fn notify(message: &str) {
    println!("{message}");
}

/// Terminal bell: the closest a CLI gets to an audio cue.
fn play_cue() {
    print!("\u{7}");
    let _ = std::io::stdout().flush();
}
