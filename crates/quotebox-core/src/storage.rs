// Persistence seam for the quote store
use crate::Result;
use quotebox_cache::KvStore;
use std::collections::HashMap;

/// Key under which the full quote list is saved as a JSON array
pub const QUOTES_KEY: &str = "quotes";

/// Key under which the active category filter is saved
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

/// Anything that can hold string values under string keys
///
/// The quote store only ever talks to this trait, so tests can run
/// against [`MemoryStore`] while the CLI uses SQLite.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl KeyValueStore for KvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(KvStore::get(self, key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Ok(KvStore::set(self, key, value)?)
    }
}

/// In-process backend, nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated backend, handy for simulating a previous session
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(QUOTES_KEY).unwrap(), None);

        store.set(QUOTES_KEY, "[]").unwrap();
        assert_eq!(store.get(QUOTES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_sqlite_backend_through_trait() {
        let mut store: Box<dyn KeyValueStore> = Box::new(KvStore::in_memory().unwrap());
        store.set(SELECTED_CATEGORY_KEY, "Life").unwrap();
        assert_eq!(
            store.get(SELECTED_CATEGORY_KEY).unwrap().as_deref(),
            Some("Life")
        );
    }
}
