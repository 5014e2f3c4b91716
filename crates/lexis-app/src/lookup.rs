use std::sync::Arc;
use std::time::Duration;

use lexis_backend::{GenerateError, Generator, PronunciationLookup};
use lexis_config::trending::TrendingConfig;
use lexis_core::failure::error_record;
use lexis_core::featured::{pad_trending, word_of_the_day};
use lexis_core::{Clock, TrendingTracker, hydrate, normalize, normalize_term, parse};
use lexis_store::{Database, StoreError};
use lexis_types::{LexicalRecord, Pronunciation, RawDefinitions, StoredRecord, TrendingEntry};

pub type SharedClock = Arc<dyn Clock>;

enum Resolved {
    Offline(LexicalRecord),
    Fresh(LexicalRecord),
    Failed(LexicalRecord),
}

impl Resolved {
    fn into_record(self) -> LexicalRecord {
        match self {
            Resolved::Offline(record) | Resolved::Fresh(record) | Resolved::Failed(record) => {
                record
            }
        }
    }
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sequences one word lookup: offline copy, generation, parsing,
/// pronunciation, persistence and history.
pub struct WordService {
    generator: Arc<dyn Generator>,
    pronunciation: Option<Arc<dyn PronunciationLookup>>,
    db: Database,
    trending: TrendingTracker<SharedClock>,
    fallback_words: Vec<String>,
    clock: SharedClock,
    timeout: Duration,
}

impl WordService {
    pub fn new(
        generator: Arc<dyn Generator>,
        db: Database,
        clock: SharedClock,
        trending: &TrendingConfig,
    ) -> Self {
        let tracker = TrendingTracker::with_clock(clock.clone())
            .capacity(trending.capacity)
            .retention(chrono::Duration::days(trending.retention_days))
            .min_term_len(trending.min_term_len);

        Self {
            generator,
            pronunciation: None,
            db,
            trending: tracker,
            fallback_words: trending.fallback_words.clone(),
            clock,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_pronunciation(mut self, lookup: Arc<dyn PronunciationLookup>) -> Self {
        self.pronunciation = Some(lookup);
        self
    }

    /// Upper bound on each outbound call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Look up `term` on behalf of the user: the result is saved and the
    /// word goes into history. Returns `None` only for blank input; every
    /// failure is folded into an error-shaped record.
    pub async fn lookup(&self, term: &str) -> Option<LexicalRecord> {
        let word = normalize_term(term);
        if word.is_empty() {
            return None;
        }

        let record = match self.resolve(&word).await {
            Resolved::Offline(record) => record,
            Resolved::Fresh(record) => {
                if let Err(e) = self.db.save_word(&StoredRecord::from(record.clone())).await {
                    tracing::warn!("Failed to save {}: {}", word, e);
                }
                record
            }
            Resolved::Failed(record) => return Some(record),
        };

        self.append_history(&word).await;
        Some(record)
    }

    /// Fetch a record without saving it or touching history
    async fn resolve(&self, word: &str) -> Resolved {
        if let Some(record) = self.offline_copy(word).await {
            tracing::info!("Serving offline copy of {}", word);
            return Resolved::Offline(record);
        }

        let raw = match self.generate(word).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Error fetching definition for {}: {}", word, e);
                return Resolved::Failed(error_record(word, e.kind(), self.clock.now()));
            }
        };

        let mut parsed = parse(&raw);
        parsed.definitions = normalize(RawDefinitions::Grouped(parsed.definitions));
        tracing::debug!(
            "Parsed {} definition groups for {}",
            parsed.definitions.len(),
            word
        );

        let pronunciation = self.pronounce(word).await;
        Resolved::Fresh(LexicalRecord::from_parts(
            word.to_string(),
            pronunciation,
            parsed,
            self.clock.now(),
        ))
    }

    /// Navigation-triggering search: counts toward trending, then looks up
    pub async fn search(&self, term: &str) -> Option<LexicalRecord> {
        let word = normalize_term(term);
        if word.is_empty() {
            return None;
        }

        self.trending.record(&word);
        self.lookup(&word).await
    }

    /// Trending words padded with the configured defaults
    pub fn featured_words(&self, limit: usize) -> Vec<String> {
        pad_trending(
            self.trending.top_trending(limit),
            &self.fallback_words,
            limit,
        )
    }

    pub fn trending(&self, limit: usize) -> Vec<TrendingEntry> {
        self.trending.recent(limit)
    }

    /// Full records for the featured words; browsing leaves history alone
    pub async fn featured(&self, limit: usize) -> Vec<LexicalRecord> {
        let mut records = Vec::new();
        for word in self.featured_words(limit) {
            records.push(self.resolve(&word).await.into_record());
        }
        records
    }

    pub async fn word_of_the_day(&self) -> LexicalRecord {
        let word = word_of_the_day(self.clock.now().date_naive());
        self.resolve(word).await.into_record()
    }

    /// One round trip to the generation backend
    pub async fn check_connection(&self) -> bool {
        self.generator.check_connection().await
    }

    /// Keep a copy of `term` for offline use. Returns false when the
    /// lookup failed and nothing was saved.
    pub async fn save_offline(&self, term: &str) -> Result<bool, StoreError> {
        let word = normalize_term(term);
        let stored = match self.db.get_word(&word).await? {
            Some(stored) => stored,
            None => match self.lookup(&word).await {
                Some(record) if !record.is_error() => StoredRecord::from(record),
                _ => return Ok(false),
            },
        };

        self.db.save_for_offline(&stored).await?;
        Ok(true)
    }

    async fn generate(&self, word: &str) -> Result<String, GenerateError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(word)).await {
            Ok(result) => result,
            Err(_) => Err(GenerateError::Timeout),
        }
    }

    async fn offline_copy(&self, word: &str) -> Option<LexicalRecord> {
        match self.db.get_offline(word).await {
            Ok(stored) => stored.map(hydrate),
            Err(e) => {
                tracing::warn!("Offline store unavailable for {}: {}", word, e);
                None
            }
        }
    }

    /// Never empty: falls back to the word itself
    async fn pronounce(&self, word: &str) -> Pronunciation {
        let Some(lookup) = &self.pronunciation else {
            return Pronunciation::plain(word);
        };

        match tokio::time::timeout(self.timeout, lookup.lookup(word)).await {
            Ok(Ok(Some(found))) if !found.text.trim().is_empty() => found,
            Ok(Ok(_)) => Pronunciation::plain(word),
            Ok(Err(e)) => {
                tracing::warn!("Error fetching pronunciation for {}: {}", word, e);
                Pronunciation::plain(word)
            }
            Err(_) => {
                tracing::warn!("Pronunciation lookup timed out for {}", word);
                Pronunciation::plain(word)
            }
        }
    }

    async fn append_history(&self, word: &str) {
        if let Err(e) = self.db.add_to_history(word).await {
            tracing::warn!("Failed to add {} to history: {}", word, e);
        }
    }
}
