mod database;

pub use database::Database;

use std::path::PathBuf;

use crate::error::StorageError;

/// Durable keys. The snapshot is primary; settings, schedule and notes
/// are independently written sub-records; the last two are small scalar
/// strings with their own save points.
pub const STATE_KEY: &str = "app_state";
pub const SETTINGS_KEY: &str = "settings";
pub const SCHEDULE_KEY: &str = "schedule";
pub const NOTES_KEY: &str = "notes";
pub const LAST_DATE_KEY: &str = "last_session_date";
pub const THEME_KEY: &str = "theme";

/// Durable key-value storage. The application treats persistence as
/// nothing more than this: string keys to JSON (or scalar) strings.
pub trait KvStore {
    /// Read a value, `None` when the key has never been written.
    ///
    /// # Errors
    /// Returns an error when the underlying store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error when the underlying store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/grove[-dev]/` based on GROVE_ENV, or the directory
/// named by GROVE_DATA_DIR when set (used by tests and scripting).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var("GROVE_DATA_DIR") {
        Ok(explicit) => PathBuf::from(explicit),
        Err(_) => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("GROVE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("grove-dev")
            } else {
                base_dir.join("grove")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
