use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use lexis_config::store::StoreConfig;
use lexis_types::{FavoriteItem, HistoryItem, StoredRecord};
use serde_json::Value;
use uuid::Uuid;

use crate::StoreError;
use crate::backend::{Backend, JsonFileBackend, MemoryBackend};
use crate::collection::Collection;

pub const WORDS: &str = "words";
pub const HISTORY: &str = "history";
pub const FAVORITES: &str = "favorites";
pub const OFFLINE: &str = "offline";
pub const PREFERENCES: &str = "preferences";

/// Named collections backing words, history, favorites, offline copies and
/// preferences. Operations on different collections are independent.
#[derive(Clone)]
pub struct Database {
    words: Collection<StoredRecord>,
    history: Collection<HistoryItem>,
    favorites: Collection<FavoriteItem>,
    offline: Collection<StoredRecord>,
    preferences: Collection<Value>,
}

impl Database {
    pub fn with_backends<F>(mut backend_for: F) -> Self
    where
        F: FnMut(&'static str) -> Arc<dyn Backend>,
    {
        Self {
            words: Collection::new(WORDS, backend_for(WORDS)),
            history: Collection::new(HISTORY, backend_for(HISTORY)),
            favorites: Collection::new(FAVORITES, backend_for(FAVORITES)),
            offline: Collection::new(OFFLINE, backend_for(OFFLINE)),
            preferences: Collection::new(PREFERENCES, backend_for(PREFERENCES)),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_backends(|_| Arc::new(MemoryBackend::new()))
    }

    /// One `<name>.json` file per collection under `dir`
    pub fn open(dir: &Path) -> Self {
        tracing::info!("Opening word store at {}", dir.display());
        Self::with_backends(|name| Arc::new(JsonFileBackend::new(dir.join(format!("{name}.json")))))
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        if config.persistent {
            Self::with_backends(|name| Arc::new(JsonFileBackend::new(config.collection_path(name))))
        } else {
            Self::in_memory()
        }
    }

    // Words

    pub async fn get_word(&self, word: &str) -> Result<Option<StoredRecord>, StoreError> {
        self.words.get(word).await
    }

    pub async fn save_word(&self, record: &StoredRecord) -> Result<(), StoreError> {
        self.words.put(&record.word, record).await
    }

    pub async fn delete_word(&self, word: &str) -> Result<(), StoreError> {
        self.words.delete(word).await
    }

    pub async fn all_words(&self) -> Result<Vec<StoredRecord>, StoreError> {
        self.words.list().await
    }

    // History

    pub async fn add_to_history(&self, word: &str) -> Result<HistoryItem, StoreError> {
        let item = HistoryItem {
            id: Uuid::new_v4(),
            word: word.to_string(),
            timestamp: Utc::now(),
        };
        self.history.put(&item.id.to_string(), &item).await?;
        Ok(item)
    }

    /// Newest first
    pub async fn history(&self) -> Result<Vec<HistoryItem>, StoreError> {
        let mut items = self.history.list().await?;
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(items)
    }

    pub async fn clear_history(&self) -> Result<(), StoreError> {
        self.history.clear().await
    }

    /// Drop every history row for `word`
    pub async fn remove_word_from_history(&self, word: &str) -> Result<usize, StoreError> {
        self.history.delete_where(|item| item.word == word).await
    }

    // Favorites

    pub async fn add_favorite(&self, word: &str) -> Result<(), StoreError> {
        let item = FavoriteItem {
            word: word.to_string(),
            timestamp: Utc::now(),
        };
        self.favorites.put(word, &item).await
    }

    pub async fn remove_favorite(&self, word: &str) -> Result<(), StoreError> {
        self.favorites.delete(word).await
    }

    pub async fn clear_favorites(&self) -> Result<(), StoreError> {
        self.favorites.clear().await
    }

    pub async fn favorites(&self) -> Result<Vec<FavoriteItem>, StoreError> {
        self.favorites.list().await
    }

    pub async fn is_favorited(&self, word: &str) -> Result<bool, StoreError> {
        self.favorites.contains(word).await
    }

    // Offline copies

    pub async fn save_for_offline(&self, record: &StoredRecord) -> Result<(), StoreError> {
        self.offline.put(&record.word, record).await
    }

    pub async fn get_offline(&self, word: &str) -> Result<Option<StoredRecord>, StoreError> {
        self.offline.get(word).await
    }

    pub async fn remove_from_offline(&self, word: &str) -> Result<(), StoreError> {
        self.offline.delete(word).await
    }

    pub async fn clear_offline(&self) -> Result<(), StoreError> {
        self.offline.clear().await
    }

    pub async fn offline_words(&self) -> Result<Vec<StoredRecord>, StoreError> {
        self.offline.list().await
    }

    pub async fn is_offline(&self, word: &str) -> Result<bool, StoreError> {
        self.offline.contains(word).await
    }

    // Preferences

    pub async fn get_preference(&self, id: &str) -> Result<Option<Value>, StoreError> {
        self.preferences.get(id).await
    }

    pub async fn set_preference(&self, id: &str, data: &Value) -> Result<(), StoreError> {
        self.preferences.put(id, data).await
    }
}

#[cfg(test)]
mod tests {
    use lexis_types::{Pronunciation, RawDefinitions};
    use serde_json::json;

    use super::*;

    fn stored(word: &str) -> StoredRecord {
        StoredRecord {
            word: word.into(),
            pronunciation: Pronunciation::plain(word),
            definitions: RawDefinitions::default(),
            examples: vec![],
            synonyms: vec![],
            antonyms: vec![],
            etymology: String::new(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn words_are_keyed_by_word() {
        let db = Database::in_memory();
        db.save_word(&stored("lucid")).await.unwrap();
        db.save_word(&stored("lucid")).await.unwrap();

        assert_eq!(db.all_words().await.unwrap().len(), 1);
        assert!(db.get_word("lucid").await.unwrap().is_some());

        db.delete_word("lucid").await.unwrap();
        assert!(db.get_word("lucid").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn history_lists_newest_first_and_removes_by_word() {
        let db = Database::in_memory();
        db.add_to_history("first").await.unwrap();
        db.add_to_history("second").await.unwrap();
        db.add_to_history("first").await.unwrap();

        let history = db.history().await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history[0].timestamp >= history[2].timestamp);

        assert_eq!(db.remove_word_from_history("first").await.unwrap(), 2);
        let history = db.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].word, "second");

        db.clear_history().await.unwrap();
        assert!(db.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn favorites_toggle() {
        let db = Database::in_memory();
        db.add_favorite("halcyon").await.unwrap();
        db.add_favorite("halcyon").await.unwrap();
        assert!(db.is_favorited("halcyon").await.unwrap());
        assert_eq!(db.favorites().await.unwrap().len(), 1);

        db.remove_favorite("halcyon").await.unwrap();
        assert!(!db.is_favorited("halcyon").await.unwrap());
    }

    #[tokio::test]
    async fn offline_copies_are_separate_from_words() {
        let db = Database::in_memory();
        db.save_for_offline(&stored("enigma")).await.unwrap();

        assert!(db.is_offline("enigma").await.unwrap());
        assert!(db.get_word("enigma").await.unwrap().is_none());

        db.clear_offline().await.unwrap();
        assert!(db.offline_words().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn preferences_hold_arbitrary_json() {
        let db = Database::in_memory();
        db.set_preference("theme", &json!({"dark": true})).await.unwrap();

        assert_eq!(
            db.get_preference("theme").await.unwrap(),
            Some(json!({"dark": true}))
        );
        assert_eq!(db.get_preference("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_database_reads_legacy_flat_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("words.json"),
            r#"{"bark":{"word":"bark","pronunciation":{"text":"bɑːk"},
                "definitions":[{"partOfSpeech":"noun","meaning":"a sound"}],
                "examples":[],"synonyms":[],"antonyms":[],"etymology":"",
                "timestamp":"2024-05-01T10:00:00Z"}}"#,
        )
        .unwrap();

        let db = Database::open(dir.path());
        let record = db.get_word("bark").await.unwrap().unwrap();
        assert!(matches!(record.definitions, RawDefinitions::Flat(ref rows) if rows.len() == 1));
    }
}
