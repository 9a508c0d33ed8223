use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use millet_core::i18n::{LANGUAGE_PREF_KEY, restore_language};
use millet_types::Language;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}

/// Small string key-value file kept next to the client, the local stand-in
/// for browser storage.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Load the file at `path`. A missing file starts empty; an unreadable
    /// one is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("Ignoring corrupt preferences at {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Startup language: the stored code if recognised, else English.
    pub fn language(&self) -> Language {
        restore_language(self.get(LANGUAGE_PREF_KEY))
    }

    /// Persist a language switch. Unrecognised codes are ignored and leave
    /// the stored value alone.
    pub fn set_language(&mut self, code: &str) -> Result<Option<Language>, PrefsError> {
        let Some(language) = Language::from_code(code) else {
            debug!("Ignoring unsupported language '{}'", code);
            return Ok(None);
        };
        self.set(LANGUAGE_PREF_KEY, language.code())?;
        Ok(Some(language))
    }

    fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&self.values)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut prefs = PreferenceStore::open(&path).unwrap();
        assert_eq!(prefs.language(), Language::En);
        assert_eq!(prefs.set_language("ta").unwrap(), Some(Language::Ta));

        let prefs = PreferenceStore::open(&path).unwrap();
        assert_eq!(prefs.language(), Language::Ta);
        assert_eq!(prefs.get("language"), Some("ta"));
    }

    #[test]
    fn unsupported_language_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = PreferenceStore::open(dir.path().join("prefs.json")).unwrap();
        prefs.set_language("hi").unwrap();

        assert_eq!(prefs.set_language("fr").unwrap(), None);
        assert_eq!(prefs.language(), Language::Hi);
    }

    #[test]
    fn unrecognised_stored_code_restores_english() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"language":"xx"}"#).unwrap();

        assert_eq!(PreferenceStore::open(&path).unwrap().language(), Language::En);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let mut prefs = PreferenceStore::open(&path).unwrap();
        assert_eq!(prefs.get("language"), None);
        prefs.set("language", "te").unwrap();
        assert_eq!(PreferenceStore::open(&path).unwrap().language(), Language::Te);
    }
}
