//! Typed list/flag access on top of a raw backend
//!
//! This is a best-effort cache, not a system of record: reads that fail or
//! don't parse come back empty, writes that fail are logged and dropped.

use super::backend::StorageBackend;
use crate::consts::ALL_KEYS;

/// Value stored for a set flag
const FLAG_SET: &str = "true";

/// Persistent store wrapping a [`StorageBackend`]
#[derive(Debug, Clone, Default)]
pub struct PersistentStore<B> {
    backend: B,
}

impl<B: StorageBackend> PersistentStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Load the list stored under `key`, or an empty list if absent/corrupt
    pub fn load_list(&self, key: &str) -> Vec<String> {
        let json = match self.backend.get_item(key) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read {}: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&json) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Discarding unreadable {}: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Save a list under `key`. Failures are logged and ignored.
    pub fn save_list<S: AsRef<str>>(&mut self, key: &str, list: &[S]) {
        let items: Vec<&str> = list.iter().map(AsRef::as_ref).collect();
        let json = match serde_json::to_string(&items) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.set_item(key, &json) {
            log::warn!("Could not save {}: {}", key, e);
        }
    }

    /// True only if the flag was written by [`Self::set_flag`]
    pub fn load_flag(&self, key: &str) -> bool {
        match self.backend.get_item(key) {
            Ok(value) => value.as_deref() == Some(FLAG_SET),
            Err(e) => {
                log::warn!("Could not read {}: {}", key, e);
                false
            }
        }
    }

    pub fn set_flag(&mut self, key: &str) {
        if let Err(e) = self.backend.set_item(key, FLAG_SET) {
            log::warn!("Could not save {}: {}", key, e);
        }
    }

    /// Erase every key this crate writes
    pub fn clear_all(&mut self) {
        for key in ALL_KEYS {
            if let Err(e) = self.backend.remove_item(key) {
                log::warn!("Could not clear {}: {}", key, e);
            }
        }
        log::info!("Stored progress cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryBackend;

    #[test]
    fn test_list_round_trip_preserves_order() {
        let mut store = PersistentStore::new(MemoryBackend::new());
        store.save_list(KEY_CHAPTERS_COMPLETED, &["texts", "childhood", "hola"]);

        assert_eq!(
            store.load_list(KEY_CHAPTERS_COMPLETED),
            vec!["texts", "childhood", "hola"]
        );
        assert_eq!(
            store.backend().raw(KEY_CHAPTERS_COMPLETED),
            Some(r#"["texts","childhood","hola"]"#)
        );
    }

    #[test]
    fn test_missing_list_is_empty() {
        let store = PersistentStore::new(MemoryBackend::new());
        assert!(store.load_list(KEY_HEARTS_FOUND).is_empty());
    }

    #[test]
    fn test_corrupt_list_is_empty() {
        for raw in ["not json", "{\"a\":1}", "[1, 2, 3]", "null", ""] {
            let store =
                PersistentStore::new(MemoryBackend::new().with_item(KEY_HEARTS_FOUND, raw));
            assert!(store.load_list(KEY_HEARTS_FOUND).is_empty(), "raw = {raw:?}");
        }
    }

    #[test]
    fn test_failed_write_is_silent() {
        let mut backend = MemoryBackend::new();
        backend.set_fail_writes(true);
        let mut store = PersistentStore::new(backend);

        store.save_list(KEY_HEARTS_FOUND, &["1"]);
        store.set_flag(KEY_JOURNEY_COMPLETED);
        store.clear_all();

        assert!(store.load_list(KEY_HEARTS_FOUND).is_empty());
        assert!(!store.load_flag(KEY_JOURNEY_COMPLETED));
    }

    #[test]
    fn test_unreadable_storage_degrades_to_empty() {
        let mut backend = MemoryBackend::new()
            .with_item(KEY_HEARTS_FOUND, r#"["1","2"]"#)
            .with_item(KEY_JOURNEY_COMPLETED, "true");
        backend.set_fail_reads(true);
        let store = PersistentStore::new(backend);

        assert!(store.load_list(KEY_HEARTS_FOUND).is_empty());
        assert!(!store.load_flag(KEY_JOURNEY_COMPLETED));
    }

    #[test]
    fn test_flag() {
        let mut store = PersistentStore::new(MemoryBackend::new());
        assert!(!store.load_flag(KEY_JOURNEY_COMPLETED));

        store.set_flag(KEY_JOURNEY_COMPLETED);
        assert!(store.load_flag(KEY_JOURNEY_COMPLETED));
        assert_eq!(store.backend().raw(KEY_JOURNEY_COMPLETED), Some("true"));

        let other = PersistentStore::new(
            MemoryBackend::new().with_item(KEY_JOURNEY_COMPLETED, "yes"),
        );
        assert!(!other.load_flag(KEY_JOURNEY_COMPLETED));
    }

    #[test]
    fn test_clear_all_only_touches_own_keys() {
        let backend = MemoryBackend::new().with_item("unrelated", "keep me");
        let mut store = PersistentStore::new(backend);
        store.save_list(KEY_CHAPTERS_COMPLETED, &["childhood"]);
        store.save_list(KEY_HEARTS_FOUND, &["1", "2"]);
        store.set_flag(KEY_JOURNEY_COMPLETED);

        store.clear_all();

        assert!(store.load_list(KEY_CHAPTERS_COMPLETED).is_empty());
        assert!(store.load_list(KEY_HEARTS_FOUND).is_empty());
        assert!(!store.load_flag(KEY_JOURNEY_COMPLETED));
        assert_eq!(store.backend().raw("unrelated"), Some("keep me"));
    }
}
