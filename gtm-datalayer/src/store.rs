//! Backing store contract
//!
//! The buffer persists through a narrow key-value seam: one opaque string
//! per namespace, scoped per visitor. Production implementations sit on a
//! cookie jar; [`MemoryStore`] backs tests, the demo binary, and embedders
//! that flush cookies themselves.

use std::collections::HashMap;

/// Per-visitor key-value storage for serialized payloads.
///
/// Implementations own durability and scoping; the buffer never manages
/// cookie attributes (expiry, domain, security flags).
pub trait PayloadStore {
    /// Current value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any prior value.
    fn set(&mut self, key: &str, value: &str);

    /// Delete the entry for `key`. A missing entry is not an error.
    fn remove(&mut self, key: &str);
}

impl<S: PayloadStore + ?Sized> PayloadStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store, one jar per visitor session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PayloadStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("ns"), None);

        store.set("ns", "{\"a\":1}");
        assert_eq!(store.get("ns").as_deref(), Some("{\"a\":1}"));
        assert_eq!(store.len(), 1);

        store.set("ns", "{\"a\":2}");
        assert_eq!(store.get("ns").as_deref(), Some("{\"a\":2}"));
        assert_eq!(store.len(), 1);

        store.remove("ns");
        assert_eq!(store.get("ns"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_entry_is_noop() {
        let mut store = MemoryStore::new();
        store.remove("absent");
        assert!(store.is_empty());
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let mut store = MemoryStore::new();
        store.set("module_a", "1");
        store.set("module_b", "2");

        store.remove("module_a");
        assert_eq!(store.get("module_a"), None);
        assert_eq!(store.get("module_b").as_deref(), Some("2"));
    }

    #[test]
    fn test_mut_reference_forwards_to_inner_store() {
        fn write_via<S: PayloadStore>(mut store: S) {
            store.set("ns", "value");
        }

        let mut store = MemoryStore::new();
        write_via(&mut store);
        // Writes went to the underlying jar.
        assert_eq!(store.get("ns").as_deref(), Some("value"));
    }
}
