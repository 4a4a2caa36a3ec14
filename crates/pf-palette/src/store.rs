//! Opaque key-value persistence.
//!
//! The editor keeps two documents: the working session and the saved
//! palette library. Both are JSON strings under fixed keys. How they are
//! stored is the [`Store`]'s business; [`FileStore`] keeps one file per key
//! in a data directory, [`MemoryStore`] keeps them in a map.
//!
//! Loading is tolerant: a missing or corrupt document is logged and
//! replaced by the default value, so a broken file never locks the user out.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Key of the working session document.
pub const STATE_KEY: &str = "palette-forge-state";

/// Key of the saved palette library document.
pub const SAVED_KEY: &str = "palette-forge-saved";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid store key '{0}'")]
    InvalidKey(String),
}

/// A string-to-string store.
pub trait Store {
    /// Read the value under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read and decode a JSON document, falling back to `T::default()` when the
/// key is absent or the document cannot be read or parsed.
pub fn load_json<T: DeserializeOwned + Default>(store: &dyn Store, key: &str) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored document, using defaults");
            return T::default();
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read stored document");
            return T::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(key, error = %e, "failed to parse stored document");
        T::default()
    })
}

/// Encode `value` as JSON and write it under `key`.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_json<T: Serialize>(store: &mut dyn Store, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(value)?;
    store.set(key, &raw)?;
    debug!(key, bytes = raw.len(), "stored document");
    Ok(())
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ─── FileStore ───────────────────────────────────────────────────────────────

/// One `<key>.json` file per key inside a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Write-then-rename: readers never see a partial document.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        colors: Vec<String>,
    }

    fn doc() -> Doc {
        Doc { colors: vec!["#FF0000".into(), "#00FF00".into()] }
    }

    #[test]
    fn memory_roundtrip() {
        let mut store = MemoryStore::new();
        save_json(&mut store, STATE_KEY, &doc()).unwrap();
        let loaded: Doc = load_json(&store, STATE_KEY);
        assert_eq!(loaded, doc());
    }

    #[test]
    fn missing_key_loads_default() {
        let store = MemoryStore::new();
        let loaded: Doc = load_json(&store, STATE_KEY);
        assert_eq!(loaded, Doc::default());
    }

    #[test]
    fn corrupt_document_loads_default() {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, "{not json").unwrap();
        let loaded: Doc = load_json(&store, STATE_KEY);
        assert_eq!(loaded, Doc::default());
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));
        assert_eq!(store.get(SAVED_KEY).unwrap(), None);

        save_json(&mut store, SAVED_KEY, &doc()).unwrap();
        assert!(dir.path().join("data").join("palette-forge-saved.json").exists());

        let reopened = FileStore::new(dir.path().join("data"));
        let loaded: Doc = load_json(&reopened, SAVED_KEY);
        assert_eq!(loaded, doc());
    }

    #[test]
    fn file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(matches!(store.set("../escape", "x"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }
}
