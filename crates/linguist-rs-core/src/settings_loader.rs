//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `LINGUIST_DEBUG` | `debug` |
//! | `LINGUIST_LOG_LEVEL` | `log_level` |
//! | `LINGUIST_LANGUAGE_CODE` | `language_code` |
//! | `LINGUIST_SOURCE_LANGUAGE_CODE` | `source_language_code` |
//! | `LINGUIST_CATALOG_DIR` | `catalog_dir` |
//! | `LINGUIST_COMMENT_FALLBACK` | `comment_fallback` |
//! | `LINGUIST_DEFAULT_SIZE_HINT` | `default_size_hint` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use linguist_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("linguist.toml").unwrap();
//! let settings = settings_loader::from_file_with_env("linguist.json").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::{LinguistError, LinguistResult};
use crate::settings::Settings;

/// Loads settings from a TOML string. Missing keys keep their defaults.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> LinguistResult<Settings> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| LinguistError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> LinguistResult<Settings> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a JSON string. Missing keys keep their defaults.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> LinguistResult<Settings> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| LinguistError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> LinguistResult<Settings> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a file, choosing the format by extension
/// (`.json` is JSON, anything else is TOML), then applies environment
/// variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn from_file_with_env(path: impl AsRef<Path>) -> LinguistResult<Settings> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mut settings = if is_json {
        from_json_file(path)?
    } else {
        from_toml_file(path)?
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `LINGUIST_*` environment variable overrides to `settings`.
///
/// Boolean variables accept "true"/"1"/"yes" as true and anything else as
/// false. `LINGUIST_DEFAULT_SIZE_HINT` is ignored unless it parses as a
/// non-negative integer; an empty value clears the hint.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("LINGUIST_DEBUG") {
        settings.debug = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("LINGUIST_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_SOURCE_LANGUAGE_CODE") {
        settings.source_language_code = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_CATALOG_DIR") {
        settings.catalog_dir = if val.is_empty() {
            None
        } else {
            Some(PathBuf::from(val))
        };
    }

    if let Ok(val) = std::env::var("LINGUIST_COMMENT_FALLBACK") {
        settings.comment_fallback = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("LINGUIST_DEFAULT_SIZE_HINT") {
        let val = val.trim();
        if val.is_empty() {
            settings.default_size_hint = None;
        } else if let Ok(hint) = val.parse::<usize>() {
            settings.default_size_hint = Some(hint);
        }
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_flag(val: &str) -> bool {
    matches!(val.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> LinguistResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        LinguistError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(value: serde_json::Value, format: &str) -> LinguistResult<Settings> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        LinguistError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        LinguistError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = match base_map.remove(&key) {
                    Some(base_v) => merge_json(base_v, override_v),
                    None => override_v,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
