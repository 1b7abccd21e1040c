//! The application context: one object owning the state snapshot and
//! the store, wiring the clock, statistics, planner and persistence
//! together. Front-ends hold an `App` and forward commands; every
//! observable effect comes back as events.

use chrono::{Local, NaiveDate, NaiveDateTime, Utc};

use crate::error::ValidationError;
use crate::events::Event;
use crate::growth::Category;
use crate::planner::{self, ScheduleEntry};
use crate::session::SessionClock;
use crate::state::{self, AppState, PresenceEntry, Settings, Theme};
use crate::stats::{self, Achievement, DailyStats};
use crate::storage::KvStore;

pub struct App<S: KvStore> {
    store: S,
    state: AppState,
    /// Minute in which schedule entries last fired; suppresses a second
    /// fire when two polls land inside one minute. Transient.
    last_fired_minute: Option<String>,
}

impl<S: KvStore> App<S> {
    /// Load persisted state and perform the daily rollover. The rollover
    /// runs here, before anything else reads statistics.
    pub fn init(store: S) -> Self {
        let mut state = state::load_all(&store);
        let today = Local::now().date_naive();
        let last_seen = state::load_last_date(&store);
        if state.stats.rollover_if_new_day(last_seen, today) {
            state::save_last_date(&store, today);
        }
        Self {
            store,
            state,
            last_fired_minute: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> &SessionClock {
        &self.state.session
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn stats(&self) -> &DailyStats {
        &self.state.stats
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.state.schedule
    }

    pub fn snapshot(&self) -> Event {
        self.state.session.snapshot(&self.state.settings)
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        stats::achievements(&self.state.stats)
    }

    // ── Session commands ─────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.state.session.start(&self.state.settings)
    }

    pub fn toggle_pause(&mut self) -> Option<Event> {
        self.state.session.toggle_pause()
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.state.session.reset()
    }

    pub fn set_category(&mut self, category: Category) -> bool {
        self.state.session.set_category(category)
    }

    /// One-second driver tick. A completion updates statistics and
    /// triggers an immediate full save.
    pub fn tick(&mut self) -> Vec<Event> {
        let events = self.state.session.tick(&self.state.settings);
        for event in &events {
            if let Event::SessionCompleted { focus_minutes, .. } = event {
                self.state.stats.record_completion(*focus_minutes);
                self.save_all();
            }
        }
        events
    }

    // ── Schedule ─────────────────────────────────────────────────────

    /// Evaluate the recurring schedule for the current minute. Called
    /// once per poll interval; a repeat call inside an already-fired
    /// minute returns nothing.
    pub fn poll_schedule(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let minute = planner::minute_key(now);
        if self.last_fired_minute.as_deref() == Some(minute.as_str()) {
            return Vec::new();
        }
        let events: Vec<Event> = planner::due(&self.state.schedule, now)
            .into_iter()
            .map(|entry| Event::ScheduleDue {
                category: entry.category,
                at: Utc::now(),
            })
            .collect();
        if !events.is_empty() {
            self.last_fired_minute = Some(minute);
        }
        events
    }

    /// # Errors
    ///
    /// Rejects an entry with an empty time or day set; nothing persists.
    pub fn add_schedule_entry(&mut self, entry: ScheduleEntry) -> Result<(), ValidationError> {
        entry.validate()?;
        self.state.schedule.push(entry);
        state::save_schedule(&self.store, &self.state.schedule);
        Ok(())
    }

    /// # Errors
    ///
    /// Fails loudly when `index` is past the end of the schedule.
    pub fn remove_schedule_entry(&mut self, index: usize) -> Result<ScheduleEntry, ValidationError> {
        let len = self.state.schedule.len();
        if index >= len {
            return Err(ValidationError::OutOfBounds {
                collection: "schedule".to_string(),
                index,
                len,
            });
        }
        let removed = self.state.schedule.remove(index);
        state::save_schedule(&self.store, &self.state.schedule);
        Ok(removed)
    }

    // ── Settings, notes, theme, presence ─────────────────────────────

    /// # Errors
    ///
    /// Rejects non-positive durations or thresholds; nothing persists.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ValidationError> {
        settings.validate()?;
        self.state.settings = settings;
        state::save_settings(&self.store, &self.state.settings);
        Ok(())
    }

    pub fn set_note(&mut self, date: NaiveDate, text: String) {
        self.state
            .notes
            .insert(date.format("%Y-%m-%d").to_string(), text);
        state::save_notes(&self.store, &self.state.notes);
    }

    pub fn note(&self, date: NaiveDate) -> Option<&str> {
        self.state
            .notes
            .get(&date.format("%Y-%m-%d").to_string())
            .map(String::as_str)
    }

    pub fn theme(&self) -> Theme {
        state::load_theme(&self.store)
    }

    pub fn toggle_theme(&self) -> Theme {
        let theme = state::load_theme(&self.store).toggled();
        state::save_theme(&self.store, theme);
        theme
    }

    /// Append a presence sample while a session is actively running.
    /// Consecutive identical labels collapse into one entry.
    pub fn record_presence(&mut self, label: &str, focused: bool) {
        if !self.state.session.active() || self.state.session.paused() {
            return;
        }
        if self
            .state
            .presence_log
            .last()
            .is_some_and(|entry| entry.label == label)
        {
            return;
        }
        self.state.presence_log.push(PresenceEntry {
            label: label.to_string(),
            focused,
            at: Utc::now(),
        });
    }

    // ── Persistence lifecycle ────────────────────────────────────────

    /// Best-effort write of the snapshot and all sub-records.
    pub fn save_all(&self) {
        state::save_all(&self.store, &self.state);
    }

    /// Final save on termination.
    pub fn shutdown(&self) {
        self.save_all();
    }
}
