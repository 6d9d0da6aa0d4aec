//! An in-memory [`TabStorage`] standing in for the real tab-persistent
//! store, so cross-page persistence (session id, event snapshots, the
//! Comet tab-store cache) can be exercised across multiple `Engine`
//! instances within one test.

use std::collections::HashMap;
use std::sync::Mutex;

use agentdetect_dom::TabStorage;

#[derive(Debug, Default)]
pub struct MemoryTabStorage {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryTabStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at a stored value without going through the `TabStorage`
    /// trait, useful for assertions (e.g. "did the Comet probe cache its
    /// hit?").
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.lock().expect("storage lock poisoned").get(key).cloned()
    }
}

impl TabStorage for MemoryTabStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.inner.lock().expect("storage lock poisoned").get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        self.inner
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_value() {
        let storage = MemoryTabStorage::new();
        assert!(storage.read("k").is_none());
        storage.write("k", "v".to_string());
        assert_eq!(storage.read("k").as_deref(), Some("v"));
        assert_eq!(storage.peek("k").as_deref(), Some("v"));
    }
}
