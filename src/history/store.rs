//! History Store
//!
//! Bounded, most-recent-first log of exported symbols, persisted as one
//! JSON array under a single key. Missing or corrupt data reads as an
//! empty history; it is logged, never surfaced.

use super::types::HistoryEntry;
use crate::storage::KeyValueStore;
use crate::{log_error, log_warn};

/// Storage key holding the whole list
pub const HISTORY_KEY: &str = "quickqr_history";
/// Entries kept; older ones are dropped
pub const MAX_HISTORY: usize = 10;

/// Append/list/clear over a key-value store
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Prepend an entry, cap the list and persist it.
    ///
    /// Returns the new list, or an empty list if it could not be persisted.
    pub fn append(&mut self, entry: HistoryEntry) -> Vec<HistoryEntry> {
        let mut history = self.list();
        history.insert(0, entry);
        history.truncate(MAX_HISTORY);

        let json = match serde_json::to_string(&history) {
            Ok(json) => json,
            Err(e) => {
                log_error!("history", "Failed to serialize history", error = e);
                return Vec::new();
            }
        };

        if let Err(e) = self.store.set(HISTORY_KEY, &json) {
            log_error!("history", "Failed to save history", error = e);
            return Vec::new();
        }

        history
    }

    /// Read the stored list, most recent first
    pub fn list(&self) -> Vec<HistoryEntry> {
        let blob = match self.store.get(HISTORY_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log_warn!("history", "History unavailable", error = e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(history) => history,
            Err(e) => {
                log_warn!("history", "Discarding corrupt history", error = e);
                Vec::new()
            }
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            log_warn!("history", "Failed to clear history", error = e);
        }
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QrConfig;
    use crate::error::{QuickQrError, QuickQrResult};
    use crate::storage::MemoryStore;

    fn entry(n: usize) -> HistoryEntry {
        let mut config = QrConfig::default();
        config.value = format!("https://a.test/{}", n);
        HistoryEntry::at(n as i64, config, "Link", format!("entry {}", n))
    }

    #[test]
    fn test_append_prepends() {
        let mut history = HistoryStore::new(MemoryStore::new());
        history.append(entry(1));
        let list = history.append(entry(2));

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].display_name, "entry 2");
        assert_eq!(list[1].display_name, "entry 1");
        assert_eq!(history.list(), list);
    }

    #[test]
    fn test_append_caps_at_ten() {
        let mut history = HistoryStore::new(MemoryStore::new());
        let mut list = Vec::new();
        for n in 0..13 {
            list = history.append(entry(n));
        }

        assert_eq!(list.len(), MAX_HISTORY);
        assert_eq!(list[0].display_name, "entry 12");
        assert_eq!(list[9].display_name, "entry 3");
    }

    #[test]
    fn test_corrupt_blob_reads_empty() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();
        let mut history = HistoryStore::new(store);

        assert!(history.list().is_empty());

        // Appending over corruption starts a fresh list
        let list = history.append(entry(1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryStore::new(MemoryStore::new());
        history.append(entry(1));
        history.clear();

        assert!(history.list().is_empty());
        assert!(history.store().is_empty());
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> QuickQrResult<Option<String>> {
            Err(QuickQrError::storage("unavailable"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> QuickQrResult<()> {
            Err(QuickQrError::storage("unavailable"))
        }

        fn remove(&mut self, _key: &str) -> QuickQrResult<()> {
            Err(QuickQrError::storage("unavailable"))
        }
    }

    #[test]
    fn test_unavailable_store_is_swallowed() {
        let mut history = HistoryStore::new(BrokenStore);
        assert!(history.list().is_empty());
        assert!(history.append(entry(1)).is_empty());
        history.clear();
    }
}
