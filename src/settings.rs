use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::traits::SettingsStore;

/// Keys the update checker reads and writes.
pub mod keys {
    pub const LAST_CHECK_TIME: &str = "LastCheckTime";
    pub const SKIP_THIS_VERSION: &str = "SkipThisVersion";
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value store persisted as a single JSON object on disk.
///
/// A missing file reads as an empty store. Timestamps are stored as seconds
/// since the Unix epoch.
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, JsonValue>, SettingsError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(SettingsError::Io(e)),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    fn store(&self, map: &BTreeMap<String, JsonValue>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string(map)?)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn read_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self
            .load()?
            .get(key)
            .and_then(JsonValue::as_str)
            .map(str::to_string))
    }

    fn write_string(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut map = self.load()?;
        map.insert(key.to_string(), JsonValue::from(value));
        self.store(&map)
    }

    fn read_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>, SettingsError> {
        Ok(self
            .load()?
            .get(key)
            .and_then(JsonValue::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0)))
    }

    fn write_timestamp(&self, key: &str, value: DateTime<Utc>) -> Result<(), SettingsError> {
        let mut map = self.load()?;
        map.insert(key.to_string(), JsonValue::from(value.timestamp()));
        self.store(&map)
    }
}
