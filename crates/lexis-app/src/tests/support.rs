use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use lexis_backend::{GenerateError, Generator, PronunciationError, PronunciationLookup};
use lexis_config::trending::TrendingConfig;
use lexis_core::ManualClock;
use lexis_store::Database;
use lexis_types::Pronunciation;

use crate::lookup::WordService;

pub const BARK: &str = "DEFINITIONS\n\
• [noun] 1. The sharp cry of a dog\n\
  - Example: \"The bark woke us.\"\n\
• [verb] 1. To make a sharp cry\n\
• [noun] 2. The outer covering of a tree\n\
EXAMPLES\n\
• \"Dogs bark at strangers.\"\n\
SYNONYMS\n\
• yap, woof\n\
ANTONYMS\n\
• None\n\
ETYMOLOGY\n\
Old English beorcan";

type Respond = Box<dyn Fn() -> Result<String, GenerateError> + Send + Sync>;

/// Fake provider with a fixed response and a call counter
pub struct ScriptedGenerator {
    respond: Respond,
    delay: Option<Duration>,
    reachable: bool,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn ok(text: &'static str) -> Self {
        Self::with(Box::new(move || Ok(text.to_string())))
    }

    pub fn failing(error: fn() -> GenerateError) -> Self {
        Self::with(Box::new(move || Err(error())))
    }

    fn with(respond: Respond) -> Self {
        Self {
            respond,
            delay: None,
            reachable: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, _word: &str) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.respond)()
    }

    async fn check_connection(&self) -> bool {
        self.reachable
    }
}

pub enum FakePronunciation {
    Found(&'static str),
    Missing,
    Broken,
}

#[async_trait]
impl PronunciationLookup for FakePronunciation {
    async fn lookup(&self, _word: &str) -> Result<Option<Pronunciation>, PronunciationError> {
        match self {
            FakePronunciation::Found(text) => Ok(Some(Pronunciation {
                text: (*text).to_string(),
                audio_url: None,
            })),
            FakePronunciation::Missing => Ok(None),
            FakePronunciation::Broken => Err(PronunciationError::Api("503".into())),
        }
    }
}

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()))
}

pub fn service(generator: Arc<ScriptedGenerator>, db: Database) -> WordService {
    WordService::new(generator, db, clock(), &TrendingConfig::default())
}
