//! Durable storage for the last chosen language.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tarjama_core::Language;
use thiserror::Error;

/// Key the chosen language code is stored under
pub const LANGUAGE_KEY: &str = "lang";

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Failed to access preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON file holding a single `lang` key
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored language, `None` when nothing usable was saved yet.
    ///
    /// A corrupt file reads as empty; only IO failures are errors.
    pub fn load(&self) -> Result<Option<Language>, PrefsError> {
        let map = self.read_map()?;
        let Some(code) = map.get(LANGUAGE_KEY).and_then(Value::as_str) else {
            return Ok(None);
        };
        match code.parse() {
            Ok(language) => Ok(Some(language)),
            Err(e) => {
                tracing::warn!("Ignoring stored language: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist `language`, keeping any other keys in the file.
    ///
    /// A corrupt file is replaced.
    pub fn save(&self, language: Language) -> Result<(), PrefsError> {
        let mut map = self.read_map()?;
        map.insert(
            LANGUAGE_KEY.to_string(),
            Value::String(language.code().to_string()),
        );

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)?;
        Ok(())
    }

    fn read_map(&self) -> Result<Map<String, Value>, PrefsError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                tracing::warn!("Ignoring preferences in {:?}: not a JSON object", self.path);
                Ok(Map::new())
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences in {:?}: {}", self.path, e);
                Ok(Map::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested/prefs.json"));
        store.save(Language::Ar).unwrap();
        assert_eq!(store.load().unwrap(), Some(Language::Ar));
        store.save(Language::En).unwrap();
        assert_eq!(store.load().unwrap(), Some(Language::En));
    }

    #[test]
    fn test_other_keys_survive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"theme": "dark", "lang": "en"}"#).unwrap();

        let store = PreferenceStore::new(&path);
        store.save(Language::Ar).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["lang"], "ar");
    }

    #[test]
    fn test_unknown_code_loads_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"lang": "fr"}"#).unwrap();
        assert_eq!(PreferenceStore::new(&path).load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_loads_none_and_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let store = PreferenceStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        store.save(Language::Ar).unwrap();
        assert_eq!(store.load().unwrap(), Some(Language::Ar));
    }

    #[test]
    fn test_non_object_loads_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"["ar"]"#).unwrap();
        assert_eq!(PreferenceStore::new(&path).load().unwrap(), None);
    }
}
