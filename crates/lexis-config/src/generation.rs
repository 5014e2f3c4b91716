use std::env;

use serde::{Deserialize, Serialize};

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        .to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GenerationConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Left empty in profiles; `GEMINI_API_KEY` fills it at startup
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound for a single generation request
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl GenerationConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            api_url: env::var("GEMINI_API_URL").unwrap_or(defaults.api_url),
            timeout_seconds: env::var("GENERATION_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            ..defaults
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
