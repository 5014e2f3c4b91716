use std::env;

use serde::{Deserialize, Serialize};

fn default_capacity() -> usize {
    100
}

fn default_retention_days() -> i64 {
    7
}

fn default_min_term_len() -> usize {
    3
}

fn default_fallback_words() -> Vec<String> {
    ["paradigm", "ephemeral", "ubiquitous"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TrendingConfig {
    /// Max tracked terms; lowest counts are evicted past this
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// Shorter terms are never tracked
    #[serde(default = "default_min_term_len")]
    pub min_term_len: usize,
    /// Padding for the featured list when too few terms are trending
    #[serde(default = "default_fallback_words")]
    pub fallback_words: Vec<String>,
}

impl TrendingConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            capacity: env::var("TRENDING_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            retention_days: env::var("TRENDING_RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retention_days),
            ..defaults
        }
    }
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            retention_days: default_retention_days(),
            min_term_len: default_min_term_len(),
            fallback_words: default_fallback_words(),
        }
    }
}
