//! In-memory key-value store for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::key_value_store::KeyValueStore,
};

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    pub entries: Mutex<HashMap<String, String>>,
    /// Every call fails with a storage error.
    pub fail: bool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Storage("store unavailable".into()));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
