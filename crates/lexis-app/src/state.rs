use std::sync::Arc;
use std::time::Duration;

use lexis_backend::Generator;
use lexis_config::Config;
use lexis_core::SystemClock;
use lexis_providers::{FreeDictionaryPronunciation, GeminiGenerator};
use lexis_store::Database;

use crate::lookup::WordService;
use crate::sequencer::RequestSequencer;

pub struct AppState {
    pub service: Arc<WordService>,
    pub sequencer: Arc<RequestSequencer>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        if !config.generation.is_configured() {
            tracing::warn!("GEMINI_API_KEY is not set; lookups will report a configuration error");
        }

        let generator: Arc<dyn Generator> = Arc::new(GeminiGenerator::from_config(&config.generation)?);
        let db = Database::from_config(&config.store);

        let mut service = WordService::new(generator, db, Arc::new(SystemClock), &config.trending)
            .with_timeout(Duration::from_secs(config.generation.timeout_seconds));

        if config.pronunciation.enabled {
            let lookup = FreeDictionaryPronunciation::from_config(&config.pronunciation)?;
            service = service.with_pronunciation(Arc::new(lookup));
        }

        Ok(Self::with_service(service))
    }

    pub fn with_service(service: WordService) -> Self {
        Self {
            service: Arc::new(service),
            sequencer: Arc::new(RequestSequencer::new()),
        }
    }
}
