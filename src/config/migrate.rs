//! Configuration file upkeep: detect keys missing from an older file and
//! write them back with their default values.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Every key a complete configuration file carries.
pub const KNOWN_KEYS: &[&str] = &[
    "database",
    "ai_endpoint",
    "ai_timeout_secs",
    "at_risk_threshold",
    "poor_threshold",
    "report_width",
];

/// Keys of [`KNOWN_KEYS`] absent from the YAML document `content`.
pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
    let Some(map) = yaml.as_mapping() else {
        return Ok(KNOWN_KEYS.to_vec());
    };

    Ok(KNOWN_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .collect())
}

/// Rewrite the file at `path` with every missing key set to its default.
/// Existing values are kept. Returns the keys that were added.
pub fn migrate_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let missing = missing_keys(&content)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let cfg: Config = serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
    let yaml = serde_yaml::to_string(&cfg).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;

    Ok(missing)
}
