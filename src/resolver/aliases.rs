//! Persistent alias store at ~/.aviacode/aliases.json.
//!
//! Flat JSON map of lower-cased surface form → code. The store is a pure
//! cache: deleting it only costs re-derivation work, except for entries
//! learned from the remote directory, which is why a failed persist is
//! reported (and retried on the next learned resolution) instead of
//! silently dropped.
//!
//! Writers are serialized behind a store-level mutex and the file is
//! replaced via write-to-temp + rename, so two concurrent resolutions can
//! never interleave a read-modify-write of the whole file.

use super::types::AliasError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};
use tracing::warn;

/// The learned-alias store.
pub struct AliasStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
    persist_lock: Mutex<()>,
}

impl AliasStore {
    /// Load the store from the default location (~/.aviacode/aliases.json).
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load the store from a specific path (for testing).
    pub fn load_from(path: PathBuf) -> Self {
        let entries = Self::read_file(&path).unwrap_or_default();
        Self {
            path,
            entries: RwLock::new(entries),
            persist_lock: Mutex::new(()),
        }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".aviacode")
            .join("aliases.json")
    }

    /// An absent, empty, or corrupt file yields an empty store.
    fn read_file(path: &PathBuf) -> Option<HashMap<String, String>> {
        let data = fs::read_to_string(path).ok()?;
        if data.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<HashMap<String, String>>(&data) {
            Ok(raw) => {
                // Keys are normalized on write, but tolerate hand-edits.
                Some(raw.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "alias store corrupt, starting empty");
                None
            }
        }
    }

    /// Look up a normalized surface form.
    pub fn get(&self, normalized: &str) -> Option<String> {
        self.entries
            .read()
            .expect("alias store lock poisoned")
            .get(normalized)
            .cloned()
    }

    /// Upsert an alias and persist the store durably. Last write wins.
    ///
    /// The in-memory entry is installed before the durable write, so the
    /// current resolution succeeds even if the write fails.
    pub fn put(&self, normalized: &str, code: &str) -> Result<(), AliasError> {
        {
            let mut entries = self.entries.write().expect("alias store lock poisoned");
            let previous = entries.insert(normalized.to_lowercase(), code.to_string());
            if previous.as_deref() == Some(code) {
                // Nothing changed on disk either.
                return Ok(());
            }
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), AliasError> {
        let _guard = self.persist_lock.lock().expect("alias persist lock poisoned");

        let snapshot = self
            .entries
            .read()
            .expect("alias store lock poisoned")
            .clone();
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Number of entries (for testing).
    pub fn len(&self) -> usize {
        self.entries.read().expect("alias store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
