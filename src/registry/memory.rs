//! In-memory `KeyValueStore`

use crate::registry::traits::KeyValueStore;
use crate::utils::error::{RandomizerError, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Registry stand-in that keeps keys and values in memory.
///
/// Key paths are compared case-insensitively, like the Windows registry.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keys: RefCell<BTreeSet<String>>,
    values: RefCell<BTreeMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key_path` has been created
    pub fn has_key(&self, key_path: &str) -> bool {
        self.keys.borrow().contains(&normalize(key_path))
    }

    /// Number of values currently stored across all keys
    pub fn value_count(&self) -> usize {
        self.values.borrow().len()
    }

    fn create_key(&self, key_path: &str) -> String {
        let key = normalize(key_path);
        self.keys.borrow_mut().insert(key.clone());
        key
    }
}

fn normalize(key_path: &str) -> String {
    key_path.trim_matches('\\').to_ascii_lowercase()
}

impl KeyValueStore for MemoryStore {
    fn id(&self) -> &'static str {
        "memory"
    }

    fn set_value(&self, key_path: &str, name: &str, value: &str) -> Result<()> {
        let key = self.create_key(key_path);
        self.values
            .borrow_mut()
            .insert((key, name.to_ascii_lowercase()), value.to_string());
        Ok(())
    }

    fn get_value(&self, key_path: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .values
            .borrow()
            .get(&(normalize(key_path), name.to_ascii_lowercase()))
            .cloned())
    }

    fn delete_value(&self, key_path: &str, name: &str) -> Result<()> {
        let key = self.create_key(key_path);
        match self
            .values
            .borrow_mut()
            .remove(&(key, name.to_ascii_lowercase()))
        {
            Some(_) => Ok(()),
            None => Err(RandomizerError::Registry(format!(
                "No value named {:?} under {}",
                name, key_path
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip_is_case_insensitive() {
        let store = MemoryStore::new();
        store.set_value(r"Software\Foo", "", "bar").unwrap();
        assert_eq!(
            store.get_value(r"SOFTWARE\foo", "").unwrap().as_deref(),
            Some("bar")
        );
        assert!(store.has_key(r"software\FOO"));
    }

    #[test]
    fn test_delete_missing_value_errors_but_creates_key() {
        let store = MemoryStore::new();
        let err = store.delete_value(r"Software\Empty", "").unwrap_err();
        assert!(matches!(err, RandomizerError::Registry(_)));
        assert!(store.has_key(r"Software\Empty"));
    }

    #[test]
    fn test_delete_keeps_key() {
        let store = MemoryStore::new();
        store.set_value(r"A\B", "", "v").unwrap();
        store.delete_value(r"A\B", "").unwrap();
        assert!(store.has_key(r"A\B"));
        assert_eq!(store.get_value(r"A\B", "").unwrap(), None);
        assert_eq!(store.value_count(), 0);
    }
}
