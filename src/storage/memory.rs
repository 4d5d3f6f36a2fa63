/// In-memory persistence backend. Holds values in a mutex-guarded map;
/// useful for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{Persistence, StorageError};

#[derive(Default)]
pub struct MemoryPersistence {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let store = MemoryPersistence::new();
        assert!(store.load("themes").unwrap().is_none());

        store.save("themes", &json!([{"id": "1"}])).unwrap();
        assert_eq!(store.load("themes").unwrap(), Some(json!([{"id": "1"}])));

        store.remove("themes").unwrap();
        assert!(store.load("themes").unwrap().is_none());
    }
}
