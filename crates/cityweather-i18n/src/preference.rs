//! Persisted user preferences (a tiny key-value store).

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::PreferenceError;
use crate::language::Language;

/// Key under which the chosen interface language is stored.
pub const PREFERRED_LANG_KEY: &str = "preferredLang";

#[derive(Debug, Clone)]
pub enum PreferenceStore {
    /// JSON object on disk, rewritten on every `set`.
    File(PathBuf),

    /// Process-local store.
    Memory(Arc<Mutex<BTreeMap<String, String>>>),
}

impl PreferenceStore {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn in_memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(BTreeMap::new())))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        match self {
            Self::File(_) => Ok(self.read_file()?.remove(key)),
            Self::Memory(map) => Ok(map.lock().get(key).cloned()),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        match self {
            Self::File(path) => {
                let mut values = self.read_file()?;
                values.insert(key.to_string(), value.to_string());

                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, serde_json::to_string_pretty(&values)?)?;
                Ok(())
            }
            Self::Memory(map) => {
                map.lock().insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    /// Stored language code, as written. Read errors are logged and treated
    /// as "no preference".
    pub fn preferred_language(&self) -> Option<String> {
        match self.get(PREFERRED_LANG_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read language preference: {}", e);
                None
            }
        }
    }

    pub fn set_preferred_language(&self, language: Language) -> Result<(), PreferenceError> {
        self.set(PREFERRED_LANG_KEY, language.code())
    }

    fn read_file(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let Self::File(path) = self else {
            return Ok(BTreeMap::new());
        };

        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Startup language: stored preference, else the system locale, else the default.
pub fn initial_language_code(store: &PreferenceStore) -> String {
    if let Some(saved) = store.preferred_language().filter(|code| !code.trim().is_empty()) {
        return saved;
    }

    Language::from_system()
        .unwrap_or(Language::DEFAULT)
        .code()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.preferred_language(), None);

        store.set_preferred_language(Language::Fa).unwrap();
        assert_eq!(store.preferred_language().as_deref(), Some("fa"));
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = PreferenceStore::in_memory();
        let clone = store.clone();
        clone.set("other", "1").unwrap();
        assert_eq!(store.get("other").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::file(dir.path().join("preferences.json"));
        assert_eq!(store.get(PREFERRED_LANG_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let store = PreferenceStore::file(&path);
        store.set("theme", "dark").unwrap();
        store.set_preferred_language(Language::Ja).unwrap();

        let reopened = PreferenceStore::file(&path);
        assert_eq!(reopened.preferred_language().as_deref(), Some("ja"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_malformed_file_reads_as_no_preference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = PreferenceStore::file(&path);
        assert!(store.get(PREFERRED_LANG_KEY).is_err());
        assert_eq!(store.preferred_language(), None);
    }

    #[test]
    fn test_initial_language_prefers_saved_value() {
        let store = PreferenceStore::in_memory();
        store.set(PREFERRED_LANG_KEY, "tg").unwrap();
        assert_eq!(initial_language_code(&store), "tg");
    }

    #[test]
    fn test_initial_language_without_preference_is_supported() {
        let store = PreferenceStore::in_memory();
        let code = initial_language_code(&store);
        assert!(Language::from_code(&code).is_some());
    }
}
