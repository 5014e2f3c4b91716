use std::env;

use serde::{Deserialize, Serialize};

use self::generation::GenerationConfig;
use self::pronunciation::PronunciationConfig;
use self::store::StoreConfig;
use self::trending::TrendingConfig;

pub mod generation;
pub mod pronunciation;
pub mod store;
pub mod trending;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationConfig,
    pub pronunciation: PronunciationConfig,
    pub trending: TrendingConfig,
    pub store: StoreConfig,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        Config {
            generation: GenerationConfig::new(),
            pronunciation: PronunciationConfig::new(),
            trending: TrendingConfig::new(),
            store: StoreConfig::new(),
        }
    }

    /// Re-apply environment overrides on top of a loaded profile; the
    /// environment wins over whatever the profile stored
    pub fn with_env_overrides(self) -> Self {
        self.apply_env(|key| env::var(key).ok())
    }

    fn apply_env<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var("GEMINI_API_KEY") {
            self.generation.api_key = key;
        }
        if let Some(url) = var("GEMINI_API_URL") {
            self.generation.api_url = url;
        }
        if let Some(secs) = var("GENERATION_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.generation.timeout_seconds = secs;
        }
        if let Some(url) = var("PRONUNCIATION_API_URL") {
            self.pronunciation.api_url = url;
        }
        if let Some(capacity) = var("TRENDING_CAPACITY").and_then(|v| v.parse().ok()) {
            self.trending.capacity = capacity;
        }
        if let Some(days) = var("TRENDING_RETENTION_DAYS").and_then(|v| v.parse().ok()) {
            self.trending.retention_days = days;
        }
        if let Some(dir) = var("LEXIS_DATA_DIR") {
            self.store.data_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn partial_profile_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"trending":{"capacity":10},"store":{"persistent":false}}"#)
                .unwrap();
        assert_eq!(config.trending.capacity, 10);
        assert_eq!(config.trending.retention_days, 7);
        assert_eq!(config.trending.min_term_len, 3);
        assert!(!config.store.persistent);
        assert_eq!(config.generation.timeout_seconds, 30);
        assert!(config.pronunciation.enabled);
    }

    #[test]
    fn env_overrides_win_over_profile_values() {
        let mut profile = Config::default();
        profile.trending.capacity = 10;
        profile.generation.api_url = "http://profile".into();

        let env: HashMap<&str, &str> = [
            ("TRENDING_CAPACITY", "250"),
            ("GEMINI_API_URL", "http://env"),
            ("GENERATION_TIMEOUT_SECONDS", "not-a-number"),
            ("GEMINI_API_KEY", "secret"),
        ]
        .into_iter()
        .collect();
        let config = profile.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.trending.capacity, 250);
        assert_eq!(config.generation.api_url, "http://env");
        assert_eq!(config.generation.timeout_seconds, 30);
        assert_eq!(config.generation.api_key, "secret");
        assert_eq!(config.trending.retention_days, 7);
    }

    #[test]
    fn unset_env_keeps_profile_values() {
        let mut profile = Config::default();
        profile.trending.capacity = 10;

        let config = profile.apply_env(|_| None);
        assert_eq!(config.trending.capacity, 10);
    }

    #[test]
    fn empty_key_is_not_configured() {
        let generation = GenerationConfig::default();
        assert!(!generation.is_configured());
    }

    #[test]
    fn collection_paths_live_under_data_dir() {
        let store = StoreConfig {
            data_dir: "/tmp/lexis".into(),
            persistent: true,
        };
        assert_eq!(
            store.collection_path("words"),
            std::path::PathBuf::from("/tmp/lexis/words.json")
        );
    }
}
