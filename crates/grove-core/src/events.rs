use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::growth::Category;
use crate::session::SessionPhase;

/// Every state change in the system produces an Event.
/// The front-end consumes events to render notifications and the tree;
/// the core never touches a display surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        category: Category,
        focus_minutes: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    /// A focus session ran its full configured duration. The clock has
    /// already returned to idle when this is observed.
    SessionCompleted {
        category: Category,
        focus_minutes: u32,
        at: DateTime<Utc>,
    },
    /// Long-session notice, fired at most once per session.
    MilestoneReached {
        hours: f64,
        at: DateTime<Utc>,
    },
    /// The tree advanced to a new growth level.
    TreeLeveled {
        level: u8,
        at: DateTime<Utc>,
    },
    /// A recurring schedule entry matched the current day and minute.
    ScheduleDue {
        category: Category,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: SessionPhase,
        category: Category,
        elapsed_secs: u64,
        remaining_secs: u64,
        level: u8,
        at: DateTime<Utc>,
    },
}
