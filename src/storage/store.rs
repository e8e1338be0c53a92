//! Typed whole-collection access on top of a [`KeyValueStore`]

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::Result;
use super::kv::{KeyValueStore, MemoryStore};

/// Every key the application persists under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Notes,
    Flashcards,
    Sessions,
    Goals,
    Quizzes,
    Streak,
    Pomodoro,
    Analytics,
    Reminders,
}

impl StorageKey {
    pub const ALL: [StorageKey; 9] = [
        StorageKey::Notes,
        StorageKey::Flashcards,
        StorageKey::Sessions,
        StorageKey::Goals,
        StorageKey::Quizzes,
        StorageKey::Streak,
        StorageKey::Pomodoro,
        StorageKey::Analytics,
        StorageKey::Reminders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Notes => "ai-study-notes",
            StorageKey::Flashcards => "ai-study-flashcards",
            StorageKey::Sessions => "ai-study-sessions",
            StorageKey::Goals => "ai-study-goals",
            StorageKey::Quizzes => "ai-study-quizzes",
            StorageKey::Streak => "ai-study-streak",
            StorageKey::Pomodoro => "ai-study-pomodoro",
            StorageKey::Analytics => "ai-study-analytics",
            StorageKey::Reminders => "ai-study-reminders",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared handle to the application's persisted state.
///
/// Cloning is cheap; all clones see the same backend.
#[derive(Clone)]
pub struct StudyStore {
    backend: Arc<dyn KeyValueStore>,
}

impl StudyStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store backed by a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Read a whole collection; a key that was never written is empty
    pub fn load_collection<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Vec<T>> {
        match self.backend.get(key.as_str())? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite a whole collection
    pub fn save_collection<T: Serialize>(&self, key: StorageKey, items: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        self.backend.set(key.as_str(), &json)?;
        log::debug!("Saved {} entries to {}", items.len(), key);
        Ok(())
    }

    /// Read a singleton record, falling back to its default when absent
    pub fn load_record<T: DeserializeOwned + Default>(&self, key: StorageKey) -> Result<T> {
        match self.backend.get(key.as_str())? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(T::default()),
        }
    }

    /// Overwrite a singleton record
    pub fn save_record<T: Serialize>(&self, key: StorageKey, record: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        self.backend.set(key.as_str(), &json)?;
        log::debug!("Saved record {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStore;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct Stamp {
        label: String,
        taken_at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let store = StudyStore::in_memory();
        let notes: Vec<Stamp> = store.load_collection(StorageKey::Notes).unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_missing_record_is_default() {
        let store = StudyStore::in_memory();
        let record: Stamp = store.load_record(StorageKey::Streak).unwrap();
        assert_eq!(record, Stamp::default());
    }

    #[test]
    fn test_timestamps_persist_as_iso8601() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileStore::new(temp_dir.path().to_path_buf()).unwrap();
        let store = StudyStore::new(Arc::new(backend));

        let taken_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let stamp = Stamp {
            label: "first".to_string(),
            taken_at: Some(taken_at),
        };
        store.save_collection(StorageKey::Sessions, &[stamp.clone()]).unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("ai-study-sessions.json")).unwrap();
        assert!(raw.contains("\"takenAt\": \"2024-03-01T09:30:00Z\""));

        let loaded: Vec<Stamp> = store.load_collection(StorageKey::Sessions).unwrap();
        assert_eq!(loaded, vec![stamp]);
    }

    #[test]
    fn test_keys_are_distinct() {
        let mut names: Vec<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), StorageKey::ALL.len());
    }
}
