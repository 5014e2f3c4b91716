mod prompt;

pub use prompt::{prompt_for, validate_sections};

use lexis_core::FailureKind;
use lexis_types::Pronunciation;

/// Language-model provider producing the raw five-section entry text
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Generate the raw entry for `word`. Implementations validate the
    /// section layout before returning.
    async fn generate(&self, word: &str) -> Result<String, GenerateError>;

    /// Cheap request verifying the key and endpoint
    async fn check_connection(&self) -> bool;
}

/// Best-effort phonetic lookup
#[async_trait::async_trait]
pub trait PronunciationLookup: Send + Sync {
    /// `Ok(None)` when the provider knows nothing about `word`
    async fn lookup(&self, word: &str) -> Result<Option<Pronunciation>, PronunciationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Generation service is not configured: missing API key")]
    Configuration,

    #[error("Word not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Invalid response format: Missing {0} section")]
    MissingSection(&'static str),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("API error: {0}")]
    Api(String),
}

impl GenerateError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerateError::Configuration => FailureKind::Configuration,
            GenerateError::NotFound(_) => FailureKind::NotFound,
            GenerateError::Network(_) => FailureKind::Connectivity,
            GenerateError::Timeout => FailureKind::Timeout,
            GenerateError::RateLimited => FailureKind::RateLimited,
            GenerateError::MissingSection(_) | GenerateError::InvalidResponse(_) => {
                FailureKind::Other
            }
            GenerateError::Api(message) => FailureKind::classify(message),
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerateError::Timeout
        } else {
            GenerateError::Network(err)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PronunciationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Pronunciation API error: {0}")]
    Api(String),
}
