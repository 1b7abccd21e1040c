//! Application snapshot and the persistence controller.
//!
//! Everything persists as one full snapshot under the primary key plus
//! three independently-keyed sub-records (settings, schedule, notes).
//! Loading merges stored fields shallowly over defaults, so a snapshot
//! written by an older build keeps defaults for fields it lacks and a
//! newer build's extra fields survive a round-trip untouched.
//!
//! All writes are best-effort: a failed key is reported and skipped, the
//! remaining keys are still written, and the running session is never
//! interrupted.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::planner::ScheduleEntry;
use crate::session::SessionClock;
use crate::stats::DailyStats;
use crate::storage::{
    KvStore, LAST_DATE_KEY, NOTES_KEY, SCHEDULE_KEY, SETTINGS_KEY, STATE_KEY, THEME_KEY,
};

/// Seconds between periodic snapshot saves.
pub const AUTOSAVE_INTERVAL_SECS: u64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    /// Hours of continuous focus before the one-time milestone notice.
    #[serde(default = "default_notification_threshold_hours")]
    pub notification_threshold_hours: f64,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

fn default_focus_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_notification_threshold_hours() -> f64 {
    2.0
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            notification_threshold_hours: default_notification_threshold_hours(),
            sound_enabled: true,
        }
    }
}

impl Settings {
    pub fn focus_secs(&self) -> u64 {
        u64::from(self.focus_minutes) * 60
    }

    /// Milestone threshold in whole seconds. A fractional threshold that
    /// lands between seconds never matches the tick's exact comparison.
    pub fn threshold_secs(&self) -> u64 {
        (self.notification_threshold_hours * 3600.0) as u64
    }

    /// # Errors
    ///
    /// Returns `ValidationError` when a duration or threshold is not
    /// positive.
    pub fn validate(&self) -> Result<(), crate::error::ValidationError> {
        use crate::error::ValidationError;
        if self.focus_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "focus_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.break_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "break_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.notification_threshold_hours <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "notification_threshold_hours".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Light/dark preference, stored under its own key; absence means dark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// One foreground/background presence sample taken while a session runs.
/// An approximation of focus, not process monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceEntry {
    pub label: String,
    pub focused: bool,
    pub at: DateTime<Utc>,
}

/// The full application state: the object the primary key serializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub session: SessionClock,
    pub stats: DailyStats,
    pub settings: Settings,
    pub schedule: Vec<ScheduleEntry>,
    /// Free-text notes keyed by local date ("YYYY-MM-DD").
    pub notes: BTreeMap<String, String>,
    pub presence_log: Vec<PresenceEntry>,
    /// Fields this build does not know about, carried through save/load.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Persistence controller ──────────────────────────────────────────

/// Serialize the snapshot and the three sub-records, each to its own
/// key. Every write is independent: a failure is logged and the rest
/// still go through.
pub fn save_all<S: KvStore>(store: &S, state: &AppState) {
    write_json(store, STATE_KEY, state);
    save_settings(store, &state.settings);
    save_schedule(store, &state.schedule);
    save_notes(store, &state.notes);
}

/// Settings have their own save point, hit when the user edits them.
pub fn save_settings<S: KvStore>(store: &S, settings: &Settings) {
    write_json(store, SETTINGS_KEY, settings);
}

/// Schedule save point, hit on every add or remove.
pub fn save_schedule<S: KvStore>(store: &S, schedule: &[ScheduleEntry]) {
    write_json(store, SCHEDULE_KEY, &schedule);
}

/// Notes save point, hit when a note is written.
pub fn save_notes<S: KvStore>(store: &S, notes: &BTreeMap<String, String>) {
    write_json(store, NOTES_KEY, notes);
}

fn write_json<S: KvStore, T: Serialize>(store: &S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => {
            if let Err(e) = store.set(key, &json) {
                warn!(key, error = %e, "state write failed, continuing");
            }
        }
        Err(e) => warn!(key, error = %e, "state serialization failed, continuing"),
    }
}

/// Load the snapshot, merging stored fields over defaults, then let the
/// independently-saved sub-records override their sections. Read or
/// parse failures fall back to defaults and are reported, never fatal.
pub fn load_all<S: KvStore>(store: &S) -> AppState {
    let mut doc = match serde_json::to_value(AppState::default()) {
        Ok(v) => v,
        Err(_) => return AppState::default(),
    };
    if let Some(stored) = read_json::<S, Value>(store, STATE_KEY) {
        shallow_merge(&mut doc, stored);
    }
    let mut state: AppState = serde_json::from_value(doc).unwrap_or_default();

    if let Some(settings) = read_json::<S, Settings>(store, SETTINGS_KEY) {
        state.settings = settings;
    }
    if let Some(schedule) = read_json::<S, Vec<ScheduleEntry>>(store, SCHEDULE_KEY) {
        state.schedule = schedule;
    }
    if let Some(notes) = read_json::<S, BTreeMap<String, String>>(store, NOTES_KEY) {
        state.notes = notes;
    }
    state
}

fn read_json<S: KvStore, T: for<'de> Deserialize<'de>>(store: &S, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(v) => v?,
        Err(e) => {
            warn!(key, error = %e, "state read failed, using defaults");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, error = %e, "stored state unreadable, using defaults");
            None
        }
    }
}

/// Overlay stored top-level fields onto the default document. Shallow:
/// a stored field replaces the default wholesale, unknown stored fields
/// are kept.
fn shallow_merge(base: &mut Value, overlay: Value) {
    if let (Some(base_obj), Value::Object(overlay_obj)) = (base.as_object_mut(), overlay) {
        for (key, value) in overlay_obj {
            base_obj.insert(key, value);
        }
    }
}

/// Last date a session was recorded, from its own key.
pub fn load_last_date<S: KvStore>(store: &S) -> Option<NaiveDate> {
    let raw = match store.get(LAST_DATE_KEY) {
        Ok(v) => v?,
        Err(e) => {
            warn!(error = %e, "last-session date unreadable");
            return None;
        }
    };
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok()
}

pub fn save_last_date<S: KvStore>(store: &S, date: NaiveDate) {
    if let Err(e) = store.set(LAST_DATE_KEY, &date.format(DATE_FORMAT).to_string()) {
        warn!(error = %e, "last-session date write failed");
    }
}

/// Theme preference: the literal string "light" selects light, anything
/// else (including absence) is dark.
pub fn load_theme<S: KvStore>(store: &S) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) if raw == "light" => Theme::Light,
        Ok(_) => Theme::Dark,
        Err(e) => {
            warn!(error = %e, "theme unreadable, using dark");
            Theme::Dark
        }
    }
}

pub fn save_theme<S: KvStore>(store: &S, theme: Theme) {
    if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
        warn!(error = %e, "theme write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory store; keys listed in `deny` refuse writes.
    struct TestStore {
        map: RefCell<HashMap<String, String>>,
        deny: Vec<&'static str>,
    }

    impl TestStore {
        fn new() -> Self {
            Self {
                map: RefCell::new(HashMap::new()),
                deny: Vec::new(),
            }
        }
    }

    impl KvStore for TestStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.map.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.deny.contains(&key) {
                return Err(StorageError::QueryFailed("quota exceeded".to_string()));
            }
            self.map.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn save_load_roundtrip() {
        let store = TestStore::new();
        let mut state = AppState::default();
        state.stats.record_completion(25);
        state.settings.focus_minutes = 45;
        state.notes.insert("2026-08-06".to_string(), "deep work".to_string());
        save_all(&store, &state);

        let loaded = load_all(&store);
        assert_eq!(loaded, state);
    }

    #[test]
    fn missing_keys_yield_defaults() {
        let store = TestStore::new();
        let state = load_all(&store);
        assert_eq!(state, AppState::default());
        assert_eq!(state.settings.focus_minutes, 25);
    }

    #[test]
    fn unknown_snapshot_fields_survive_roundtrip() {
        let store = TestStore::new();
        store
            .set(STATE_KEY, r#"{"future_feature":{"enabled":true}}"#)
            .unwrap();
        let state = load_all(&store);
        assert!(state.extra.contains_key("future_feature"));

        save_all(&store, &state);
        let reloaded = load_all(&store);
        assert!(reloaded.extra.contains_key("future_feature"));
    }

    #[test]
    fn partial_settings_keep_defaults() {
        let store = TestStore::new();
        store.set(SETTINGS_KEY, r#"{"focus_minutes":50}"#).unwrap();
        let state = load_all(&store);
        assert_eq!(state.settings.focus_minutes, 50);
        assert_eq!(state.settings.break_minutes, 5);
        assert!(state.settings.sound_enabled);
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_defaults() {
        let store = TestStore::new();
        store.set(STATE_KEY, "not json at all").unwrap();
        let state = load_all(&store);
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn failed_write_does_not_block_other_keys() {
        let mut store = TestStore::new();
        store.deny = vec![SETTINGS_KEY];
        let mut state = AppState::default();
        state.stats.record_completion(25);
        save_all(&store, &state);

        let map = store.map.borrow();
        assert!(map.contains_key(STATE_KEY));
        assert!(map.contains_key(SCHEDULE_KEY));
        assert!(map.contains_key(NOTES_KEY));
        assert!(!map.contains_key(SETTINGS_KEY));
    }

    #[test]
    fn theme_defaults_to_dark() {
        let store = TestStore::new();
        assert_eq!(load_theme(&store), Theme::Dark);
        save_theme(&store, Theme::Light);
        assert_eq!(load_theme(&store), Theme::Light);
        save_theme(&store, Theme::Light.toggled());
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn last_date_roundtrip() {
        let store = TestStore::new();
        assert!(load_last_date(&store).is_none());
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        save_last_date(&store, date);
        assert_eq!(load_last_date(&store), Some(date));
    }

    #[test]
    fn settings_validation() {
        assert!(Settings::default().validate().is_ok());
        let bad = Settings {
            focus_minutes: 0,
            ..Settings::default()
        };
        assert!(bad.validate().is_err());
        let bad = Settings {
            notification_threshold_hours: 0.0,
            ..Settings::default()
        };
        assert!(bad.validate().is_err());
    }
}
