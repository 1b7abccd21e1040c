//! Session clock: the focus-timer state machine.
//!
//! The clock does not own a timer thread - the caller invokes `tick()`
//! once per second while a session runs. Pausing or resetting therefore
//! cannot leave an orphaned driver behind: there is nothing to cancel
//! beyond the caller's own loop.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Idle
//!           |
//!           +-> (completed) -> Idle
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::growth::{growth_level, Category};
use crate::state::Settings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

/// The focus-session state machine.
///
/// Commands return `Option<Event>` / `Vec<Event>`; an invalid transition
/// is a silent no-op (`None`), never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionClock {
    phase: SessionPhase,
    elapsed_secs: u64,
    category: Category,
    milestone_notified: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn active(&self) -> bool {
        self.phase != SessionPhase::Idle
    }

    pub fn paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn milestone_notified(&self) -> bool {
        self.milestone_notified
    }

    /// Current growth level derived from elapsed time.
    pub fn level(&self) -> u8 {
        growth_level(self.elapsed_secs)
    }

    /// Seconds until the configured duration is reached.
    pub fn remaining_secs(&self, settings: &Settings) -> u64 {
        settings.focus_secs().saturating_sub(self.elapsed_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, settings: &Settings) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            category: self.category,
            elapsed_secs: self.elapsed_secs,
            remaining_secs: self.remaining_secs(settings),
            level: self.level(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Select the session category. Only meaningful before a session
    /// starts; while running or paused this is a silent no-op.
    pub fn set_category(&mut self, category: Category) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        self.category = category;
        true
    }

    /// Start a session. No-op when one is already running or paused.
    pub fn start(&mut self, settings: &Settings) -> Option<Event> {
        if self.phase != SessionPhase::Idle {
            return None;
        }
        self.phase = SessionPhase::Running;
        self.elapsed_secs = 0;
        self.milestone_notified = false;
        Some(Event::SessionStarted {
            category: self.category,
            focus_minutes: settings.focus_minutes,
            at: Utc::now(),
        })
    }

    /// Single toggle between Running and Paused. No-op when idle, so an
    /// even number of calls always lands back where it started.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        match self.phase {
            SessionPhase::Running => {
                self.phase = SessionPhase::Paused;
                Some(Event::SessionPaused {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            SessionPhase::Paused => {
                self.phase = SessionPhase::Running;
                Some(Event::SessionResumed {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            SessionPhase::Idle => None,
        }
    }

    /// Abandon the session without recording it. Valid from Running or
    /// Paused; the caller must NOT report statistics for a reset.
    pub fn reset(&mut self) -> Option<Event> {
        if self.phase == SessionPhase::Idle {
            return None;
        }
        self.phase = SessionPhase::Idle;
        self.elapsed_secs = 0;
        self.milestone_notified = false;
        Some(Event::SessionReset { at: Utc::now() })
    }

    /// Advance the clock by one second. Only ticks while Running.
    ///
    /// Emits the milestone notice exactly once when the elapsed time hits
    /// the configured threshold, a level event whenever the tree grows,
    /// and `SessionCompleted` when the configured duration is reached -
    /// at which point the clock has already returned to idle.
    pub fn tick(&mut self, settings: &Settings) -> Vec<Event> {
        if self.phase != SessionPhase::Running {
            return Vec::new();
        }
        let mut events = Vec::new();
        let level_before = self.level();
        self.elapsed_secs += 1;

        if !self.milestone_notified && self.elapsed_secs == settings.threshold_secs() {
            self.milestone_notified = true;
            events.push(Event::MilestoneReached {
                hours: settings.notification_threshold_hours,
                at: Utc::now(),
            });
        }

        let level_now = self.level();
        if level_now != level_before {
            events.push(Event::TreeLeveled {
                level: level_now,
                at: Utc::now(),
            });
        }

        if self.elapsed_secs >= settings.focus_secs() {
            events.push(self.complete(settings));
        }
        events
    }

    fn complete(&mut self, settings: &Settings) -> Event {
        self.phase = SessionPhase::Idle;
        self.elapsed_secs = 0;
        self.milestone_notified = false;
        Event::SessionCompleted {
            category: self.category,
            focus_minutes: settings.focus_minutes,
            at: Utc::now(),
        }
    }
}
