use clap::Subcommand;
use grove_core::{App, Database, Settings};
use serde_json::Value;

use crate::observer;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show all settings as JSON
    Show,
    /// Get a single setting
    Get { key: String },
    /// Set a setting
    Set { key: String, value: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::init(Database::open()?);

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(app.settings())?);
        }
        ConfigAction::Get { key } => match get_field(app.settings(), &key)? {
            Value::String(s) => println!("{s}"),
            other => println!("{other}"),
        },
        ConfigAction::Set { key, value } => {
            let updated = set_field(app.settings(), &key, &value)?;
            app.update_settings(updated)?;
            observer::notify("\u{2699} Settings saved!");
        }
    }
    Ok(())
}

fn get_field(settings: &Settings, key: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let json = serde_json::to_value(settings)?;
    json.get(key)
        .cloned()
        .ok_or_else(|| format!("unknown setting: {key}").into())
}

/// Parse `value` according to the field's current JSON type, so
/// `sound_enabled` takes booleans and the durations take numbers.
fn set_field(
    settings: &Settings,
    key: &str,
    value: &str,
) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut json = serde_json::to_value(settings)?;
    let obj = json
        .as_object_mut()
        .ok_or("settings did not serialize to an object")?;
    let existing = obj
        .get(key)
        .ok_or_else(|| format!("unknown setting: {key}"))?;

    let new_value = match existing {
        Value::Bool(_) => Value::Bool(value.parse::<bool>()?),
        Value::Number(_) => {
            if let Ok(n) = value.parse::<u64>() {
                Value::Number(n.into())
            } else if let Ok(f) = value.parse::<f64>() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot parse '{value}' as number"))?
            } else {
                return Err(format!("cannot parse '{value}' as number").into());
            }
        }
        _ => Value::String(value.into()),
    };

    obj.insert(key.to_string(), new_value);
    Ok(serde_json::from_value(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_respects_types() {
        let settings = Settings::default();
        let updated = set_field(&settings, "focus_minutes", "45").unwrap();
        assert_eq!(updated.focus_minutes, 45);

        let updated = set_field(&settings, "sound_enabled", "false").unwrap();
        assert!(!updated.sound_enabled);

        let updated = set_field(&settings, "notification_threshold_hours", "1.5").unwrap();
        assert!((updated.notification_threshold_hours - 1.5).abs() < f64::EPSILON);

        assert!(set_field(&settings, "focus_minutes", "soon").is_err());
        assert!(set_field(&settings, "volume", "50").is_err());
    }

    #[test]
    fn get_field_reads_values() {
        let settings = Settings::default();
        assert_eq!(get_field(&settings, "focus_minutes").unwrap(), Value::from(25));
        assert!(get_field(&settings, "missing").is_err());
    }
}
