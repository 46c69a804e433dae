//! Saved calculation history
//!
//! Keeps the last [`HISTORY_CAPACITY`] saved results. The whole list is
//! serialized as one JSON array and written through a [`HistoryStorage`],
//! so the same logic works over browser storage, a file, or memory.

use crate::errors::StorageError;
use crate::health_metrics::DerivedMetrics;
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

/// Key the serialized history lives under
pub const HISTORY_STORAGE_KEY: &str = "health_history";

/// Maximum number of entries kept
pub const HISTORY_CAPACITY: usize = 10;

/// One saved calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Day and month in Polish short form, e.g. `19.10`
    pub date: String,
    pub bmi: f64,
    pub bmr: i64,
    pub tdee: i64,
    pub weight: f64,
}

impl HistoryEntry {
    /// Create an entry with an explicit id and display date
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        metrics: &DerivedMetrics,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            bmi: metrics.bmi,
            bmr: metrics.bmr,
            tdee: metrics.tdee,
            weight,
        }
    }

    /// Create an entry saved at `saved_at`, with a fresh unique id
    pub fn stamped<Tz: TimeZone>(
        metrics: &DerivedMetrics,
        weight: f64,
        saved_at: &DateTime<Tz>,
    ) -> Self {
        Self::new(
            Uuid::new_v4().to_string(),
            short_date(saved_at.date_naive()),
            metrics,
            weight,
        )
    }
}

/// Format a date as two-digit day and month, Polish style
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

// ============================================================================
// Storage
// ============================================================================

/// Keyed storage holding the serialized history
pub trait HistoryStorage {
    /// Read the serialized history; `None` when nothing was stored
    fn load(&self) -> Option<String>;

    /// Replace the stored history
    fn save(&mut self, serialized: String) -> Result<(), StorageError>;

    /// Remove the stored history entirely
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-memory key-value storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a serialized history
    pub fn with_history(serialized: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(HISTORY_STORAGE_KEY.to_string(), serialized.into());
        Self { values }
    }

    /// Raw value under a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.values.get(HISTORY_STORAGE_KEY).cloned()
    }

    fn save(&mut self, serialized: String) -> Result<(), StorageError> {
        self.values.insert(HISTORY_STORAGE_KEY.to_string(), serialized);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.values.remove(HISTORY_STORAGE_KEY);
        Ok(())
    }
}

// ============================================================================
// History Store
// ============================================================================

/// Capped, persisted list of saved results, oldest first
#[derive(Debug)]
pub struct HistoryStore<S: HistoryStorage> {
    storage: S,
    entries: Vec<HistoryEntry>,
}

impl<S: HistoryStorage> HistoryStore<S> {
    /// Load the history once from storage
    ///
    /// Missing or unparseable content gives an empty history.
    pub fn load(storage: S) -> Self {
        let entries = match storage.load() {
            Some(serialized) => match serde_json::from_str::<Vec<HistoryEntry>>(&serialized) {
                Ok(mut entries) => {
                    trim_to_capacity(&mut entries);
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse history, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self { storage, entries }
    }

    /// Saved entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Append an entry, evicting the oldest beyond capacity, and persist
    pub fn record(&mut self, entry: HistoryEntry) -> Result<&HistoryEntry, StorageError> {
        let mut next = self.entries.clone();
        next.push(entry);
        trim_to_capacity(&mut next);

        self.storage.save(serde_json::to_string(&next)?)?;
        self.entries = next;

        // Non-empty: an entry was just pushed
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove every entry and the stored key
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.clear()?;
        self.entries.clear();
        Ok(())
    }

    /// Serialized form of the current entries
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn trim_to_capacity(entries: &mut Vec<HistoryEntry>) {
    if entries.len() > HISTORY_CAPACITY {
        let excess = entries.len() - HISTORY_CAPACITY;
        entries.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_metrics::ProfileInput;
    use chrono::Utc;
    use proptest::prelude::*;

    fn metrics() -> DerivedMetrics {
        DerivedMetrics::compute(&ProfileInput::default())
    }

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(n.to_string(), "01.01", &metrics(), 70.0 + n as f64)
    }

    /// Storage whose writes always fail
    struct BrokenStorage;

    impl HistoryStorage for BrokenStorage {
        fn load(&self) -> Option<String> {
            None
        }

        fn save(&mut self, _serialized: String) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_missing_key_is_empty() {
        let store = HistoryStore::load(MemoryStorage::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_content_is_empty() {
        let store = HistoryStore::load(MemoryStorage::with_history("{definitely not json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_persists_full_list() {
        let mut store = HistoryStore::load(MemoryStorage::new());
        store.record(entry(1)).unwrap();
        store.record(entry(2)).unwrap();

        let raw = store.storage().get(HISTORY_STORAGE_KEY).unwrap();
        let persisted: Vec<HistoryEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(persisted, store.entries());
        assert_eq!(persisted.len(), 2);
    }

    #[test]
    fn test_reload_restores_entries() {
        let mut store = HistoryStore::load(MemoryStorage::new());
        store.record(entry(1)).unwrap();
        let storage = store.storage().clone();

        let reloaded = HistoryStore::load(storage);
        assert_eq!(reloaded.entries(), &[entry(1)]);
    }

    #[test]
    fn test_eleventh_entry_evicts_oldest() {
        let mut store = HistoryStore::load(MemoryStorage::new());
        for n in 0..11 {
            store.record(entry(n)).unwrap();
        }

        assert_eq!(store.len(), HISTORY_CAPACITY);
        assert_eq!(store.entries()[0].id, "1");
        assert_eq!(store.latest().unwrap().id, "10");
    }

    #[test]
    fn test_clear_removes_key() {
        let mut store = HistoryStore::load(MemoryStorage::new());
        store.record(entry(1)).unwrap();
        store.clear().unwrap();

        assert!(store.is_empty());
        assert!(store.storage().get(HISTORY_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_failed_write_keeps_previous_entries() {
        let mut store = HistoryStore::load(BrokenStorage);
        assert!(store.record(entry(1)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_oversized_stored_history_is_trimmed() {
        let stored: Vec<HistoryEntry> = (0..15).map(entry).collect();
        let store = HistoryStore::load(MemoryStorage::with_history(
            serde_json::to_string(&stored).unwrap(),
        ));
        assert_eq!(store.len(), HISTORY_CAPACITY);
        assert_eq!(store.entries()[0].id, "5");
    }

    #[test]
    fn test_stamped_entry() {
        let saved_at = Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
        let first = HistoryEntry::stamped(&metrics(), 70.0, &saved_at);
        let second = HistoryEntry::stamped(&metrics(), 70.0, &saved_at);

        assert_eq!(first.date, "07.03");
        assert_eq!(first.bmi, 22.9);
        assert_eq!(first.bmr, 1649);
        assert_eq!(first.tdee, 2267);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_entry_wire_shape() {
        let value = serde_json::to_value(entry(3)).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 6);
        for key in ["id", "date", "bmi", "bmr", "tdee", "weight"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Property: history keeps the last ten saves in order
        #[test]
        fn prop_history_is_fifo_capped(saves in 0usize..40) {
            let mut store = HistoryStore::load(MemoryStorage::new());
            for n in 0..saves {
                store.record(entry(n)).unwrap();
            }

            prop_assert!(store.len() <= HISTORY_CAPACITY);
            let expected: Vec<String> = (saves.saturating_sub(HISTORY_CAPACITY)..saves)
                .map(|n| n.to_string())
                .collect();
            let actual: Vec<String> = store.entries().iter().map(|e| e.id.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
