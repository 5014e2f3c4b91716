use chrono::{DateTime, Utc};
use lexis_types::{
    DefinitionGroup, ERROR_PART_OF_SPEECH, LexicalRecord, MeaningDetail, Pronunciation,
};

/// User-facing classes of lookup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    NotFound,
    Connectivity,
    Timeout,
    RateLimited,
    Other,
}

impl FailureKind {
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::Configuration => {
                "Dictionary service is not properly configured. Please check your API key."
            }
            FailureKind::NotFound => {
                "Definition Not Found: The word you are looking for does not exist in our dictionary."
            }
            FailureKind::Connectivity => {
                "Network error. Please check your internet connection and try again."
            }
            FailureKind::Timeout => "Request timed out. Please try again later.",
            FailureKind::RateLimited => "Too many requests. Please try again in a few minutes.",
            FailureKind::Other => "Unable to fetch definition. Please try again later.",
        }
    }

    /// Classify free-text backend errors that carry no structured code
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();

        if message.contains("API key") {
            FailureKind::Configuration
        } else if lower.contains("not found") {
            FailureKind::NotFound
        } else if lower.contains("network") || lower.contains("fetch") {
            FailureKind::Connectivity
        } else if lower.contains("timeout") || lower.contains("timed out") {
            FailureKind::Timeout
        } else if lower.contains("rate limit") {
            FailureKind::RateLimited
        } else {
            FailureKind::Other
        }
    }
}

/// Error-shaped record returned instead of raising
pub fn error_record(word: &str, kind: FailureKind, timestamp: DateTime<Utc>) -> LexicalRecord {
    LexicalRecord {
        word: word.to_string(),
        pronunciation: Pronunciation::plain(word),
        definitions: vec![DefinitionGroup::new(
            ERROR_PART_OF_SPEECH,
            vec![MeaningDetail::new(kind.message())],
        )],
        examples: vec!["No examples available.".to_string()],
        synonyms: Vec::new(),
        antonyms: Vec::new(),
        etymology: "Etymology information unavailable.".to_string(),
        timestamp,
    }
}
