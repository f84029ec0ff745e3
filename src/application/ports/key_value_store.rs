use crate::app_error::AppResult;

/// String key to string value storage, the local-storage equivalent for the
/// cart and the billing region.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Read a key, treating storage failures as a missing value.
pub fn read_or_none(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    store.get(key).unwrap_or_else(|err| {
        tracing::warn!(key = key, error = %err, "Failed to read from key-value store");
        None
    })
}

/// Write a key. Failures are logged and swallowed.
pub fn write_best_effort(store: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        tracing::warn!(key = key, error = %err, "Failed to persist to key-value store");
    }
}
