//! Key-value store backed by a single JSON object on disk.
//!
//! The whole map is kept in memory and rewritten on every change. An
//! unreadable or corrupt file starts an empty store.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::key_value_store::KeyValueStore,
};

pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = load_entries(&path);
        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened key-value store");

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Storage(format!("Failed to serialize store: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        // Replaced atomically via a sibling temp file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {e}", self.path.display())))
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Internal("Key-value store lock poisoned".into()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read key-value store");
            return BTreeMap::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Corrupt key-value store, starting empty");
        BTreeMap::new()
    })
}
