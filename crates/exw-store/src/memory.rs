use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::StoreError;
use crate::keys;
use crate::repository::Repository;

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.with_values(|values| values.keys().cloned().collect())
    }

    fn with_values<T>(&self, f: impl FnOnce(&mut BTreeMap<String, Value>) -> T) -> T {
        let mut guard = match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

fn check(key: &str) -> Result<(), StoreError> {
    if keys::is_valid(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

impl Repository for MemoryStore {
    fn load_value(&self, key: &str) -> Result<Option<Value>, StoreError> {
        check(key)?;
        Ok(self.with_values(|values| values.get(key).cloned()))
    }

    fn save_value(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        check(key)?;
        self.with_values(|values| values.insert(key.to_string(), value.clone()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        check(key)?;
        self.with_values(|values| values.remove(key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepositoryExt;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_load_remove() {
        let store = MemoryStore::new();
        store.save("user", &serde_json::json!({"email": "a@b.c"})).unwrap();
        let user: Option<Value> = store.load("user").unwrap();
        assert_eq!(user.unwrap()["email"], "a@b.c");
        assert_eq!(store.keys(), vec!["user".to_string()]);

        store.remove("user").unwrap();
        store.remove("user").unwrap();
        assert!(store.load_value("user").unwrap().is_none());
    }

    #[test]
    fn rejects_invalid_key() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.save_value("a/b", &Value::Null),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn type_mismatch_is_a_serialization_error() {
        let store = MemoryStore::new();
        store.save("token", "abc").unwrap();
        let result: Result<Option<f64>, _> = store.load("token");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
