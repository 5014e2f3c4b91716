use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const UNKNOWN_PART_OF_SPEECH: &str = "unknown";
pub const ERROR_PART_OF_SPEECH: &str = "error";

/// One sense of a word under a given part of speech
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeaningDetail {
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
}

impl MeaningDetail {
    pub fn new(meaning: impl Into<String>) -> Self {
        Self {
            meaning: meaning.into(),
            ..Default::default()
        }
    }
}

/// Meanings sharing one part of speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionGroup {
    pub part_of_speech: String,
    pub meanings: Vec<MeaningDetail>,
}

impl DefinitionGroup {
    pub fn new(part_of_speech: impl Into<String>, meanings: Vec<MeaningDetail>) -> Self {
        Self {
            part_of_speech: part_of_speech.into(),
            meanings,
        }
    }
}

/// Legacy single-sense definition row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatDefinition {
    pub part_of_speech: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Definitions as they may appear on disk or from older responses.
///
/// Decoding tries the grouped shape first, an empty list is therefore
/// always `Grouped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDefinitions {
    Grouped(Vec<DefinitionGroup>),
    Flat(Vec<FlatDefinition>),
}

impl Default for RawDefinitions {
    fn default() -> Self {
        RawDefinitions::Grouped(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub text: String,
    #[serde(rename = "audio", default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Pronunciation {
    /// Display the word itself when no phonetic text is known
    pub fn plain(word: &str) -> Self {
        Self {
            text: word.to_string(),
            audio_url: None,
        }
    }
}

/// Output of the response parser, before the word-level fields are attached
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
    pub definitions: Vec<DefinitionGroup>,
    pub examples: Vec<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub etymology: String,
}

/// Fully assembled dictionary entry for one word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalRecord {
    pub word: String,
    pub pronunciation: Pronunciation,
    pub definitions: Vec<DefinitionGroup>,
    pub examples: Vec<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub etymology: String,
    pub timestamp: DateTime<Utc>,
}

impl LexicalRecord {
    pub fn from_parts(
        word: String,
        pronunciation: Pronunciation,
        parsed: ParseResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            word,
            pronunciation,
            definitions: parsed.definitions,
            examples: parsed.examples,
            synonyms: parsed.synonyms,
            antonyms: parsed.antonyms,
            etymology: parsed.etymology,
            timestamp,
        }
    }

    /// True when this record carries a lookup failure instead of an entry
    pub fn is_error(&self) -> bool {
        self.definitions
            .first()
            .is_some_and(|group| group.part_of_speech == ERROR_PART_OF_SPEECH)
    }

    /// Message of an error-shaped record
    pub fn error_message(&self) -> Option<&str> {
        if !self.is_error() {
            return None;
        }
        self.definitions
            .first()
            .and_then(|group| group.meanings.first())
            .map(|m| m.meaning.as_str())
    }
}

/// Persisted form of a record; definitions may be in either shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub word: String,
    pub pronunciation: Pronunciation,
    #[serde(default)]
    pub definitions: RawDefinitions,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub etymology: String,
    pub timestamp: DateTime<Utc>,
}

impl From<LexicalRecord> for StoredRecord {
    fn from(record: LexicalRecord) -> Self {
        Self {
            word: record.word,
            pronunciation: record.pronunciation,
            definitions: RawDefinitions::Grouped(record.definitions),
            examples: record.examples,
            synonyms: record.synonyms,
            antonyms: record.antonyms,
            etymology: record.etymology,
            timestamp: record.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: Uuid,
    pub word: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub word: String,
    pub timestamp: DateTime<Utc>,
}

/// Tracked search activity for one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingEntry {
    pub word: String,
    pub count: u32,
    pub last_seen_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_definitions_decode_as_flat() {
        let json = r#"[{"partOfSpeech":"noun","meaning":"a thing"}]"#;
        let raw: RawDefinitions = serde_json::from_str(json).unwrap();
        assert!(matches!(raw, RawDefinitions::Flat(ref v) if v.len() == 1));
    }

    #[test]
    fn grouped_definitions_decode_as_grouped() {
        let json = r#"[{"partOfSpeech":"verb","meanings":[{"meaning":"to run"}]}]"#;
        let raw: RawDefinitions = serde_json::from_str(json).unwrap();
        match raw {
            RawDefinitions::Grouped(groups) => {
                assert_eq!(groups[0].part_of_speech, "verb");
                assert_eq!(groups[0].meanings[0].meaning, "to run");
                assert!(groups[0].meanings[0].synonyms.is_empty());
            }
            other => panic!("expected grouped, got {other:?}"),
        }
    }

    #[test]
    fn error_record_is_flagged() {
        let record = LexicalRecord {
            word: "zzz".into(),
            pronunciation: Pronunciation::plain("zzz"),
            definitions: vec![DefinitionGroup::new(
                ERROR_PART_OF_SPEECH,
                vec![MeaningDetail::new("boom")],
            )],
            examples: vec![],
            synonyms: vec![],
            antonyms: vec![],
            etymology: String::new(),
            timestamp: Utc::now(),
        };
        assert!(record.is_error());
        assert_eq!(record.error_message(), Some("boom"));
    }

    #[test]
    fn absent_optional_fields_are_not_serialized() {
        let json = serde_json::to_string(&MeaningDetail::new("x")).unwrap();
        assert_eq!(json, r#"{"meaning":"x"}"#);
    }
}
