use std::time::Duration;

use async_trait::async_trait;
use lexis_backend::{PronunciationError, PronunciationLookup};
use lexis_config::pronunciation::PronunciationConfig;
use lexis_types::Pronunciation;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

/// Phonetics from the Free Dictionary API
#[derive(Clone)]
pub struct FreeDictionaryPronunciation {
    client: reqwest::Client,
    api_url: String,
}

impl FreeDictionaryPronunciation {
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    pub fn from_config(config: &PronunciationConfig) -> Result<Self, PronunciationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    fn entry_url(&self, word: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            utf8_percent_encode(word, NON_ALPHANUMERIC)
        )
    }
}

#[async_trait]
impl PronunciationLookup for FreeDictionaryPronunciation {
    async fn lookup(&self, word: &str) -> Result<Option<Pronunciation>, PronunciationError> {
        let response = self.client.get(self.entry_url(word)).send().await?;

        if !response.status().is_success() {
            tracing::warn!(
                "Could not fetch pronunciation for \"{}\": HTTP {}",
                word,
                response.status()
            );
            return Ok(None);
        }

        let entries: Vec<Entry> = response
            .json()
            .await
            .map_err(|e| PronunciationError::Api(format!("Failed to parse response: {}", e)))?;

        Ok(pick_pronunciation(&entries, word))
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<Phonetic>,
}

#[derive(Debug, Deserialize)]
struct Phonetic {
    text: Option<String>,
    audio: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// First phonetic carrying audio wins; otherwise the entry-level phonetic
fn pick_pronunciation(entries: &[Entry], word: &str) -> Option<Pronunciation> {
    let entry = entries.first()?;

    if let Some(phonetic) = entry.phonetics.iter().find(|p| non_blank(&p.audio).is_some()) {
        let text = non_blank(&phonetic.text)
            .or_else(|| non_blank(&entry.phonetic))
            .unwrap_or(word);
        return Some(Pronunciation {
            text: text.to_string(),
            audio_url: non_blank(&phonetic.audio).map(String::from),
        });
    }

    non_blank(&entry.phonetic).map(|text| Pronunciation {
        text: text.to_string(),
        audio_url: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(json: &str) -> Vec<Entry> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn prefers_phonetic_with_audio() {
        let data = entries(
            r#"[{"phonetic":"/hə'ləʊ/","phonetics":[
                {"text":"/x/","audio":""},
                {"text":"/həˈloʊ/","audio":"https://audio/hello-us.mp3"}]}]"#,
        );
        let found = pick_pronunciation(&data, "hello").unwrap();

        assert_eq!(found.text, "/həˈloʊ/");
        assert_eq!(found.audio_url.as_deref(), Some("https://audio/hello-us.mp3"));
    }

    #[test]
    fn audio_without_text_falls_back_to_entry_then_word() {
        let data = entries(r#"[{"phonetics":[{"audio":"https://a/b.mp3"}]}]"#);
        assert_eq!(pick_pronunciation(&data, "bee").unwrap().text, "bee");

        let data = entries(r#"[{"phonetic":"/biː/","phonetics":[{"audio":"https://a/b.mp3"}]}]"#);
        assert_eq!(pick_pronunciation(&data, "bee").unwrap().text, "/biː/");
    }

    #[test]
    fn phonetic_text_without_audio() {
        let data = entries(r#"[{"phonetic":"/kæt/","phonetics":[]}]"#);
        let found = pick_pronunciation(&data, "cat").unwrap();
        assert_eq!(found.text, "/kæt/");
        assert_eq!(found.audio_url, None);
    }

    #[test]
    fn nothing_useful_is_none() {
        assert!(pick_pronunciation(&[], "void").is_none());
        assert!(pick_pronunciation(&entries(r#"[{"phonetics":[]}]"#), "void").is_none());
    }

    #[test]
    fn words_are_path_encoded() {
        let lookup = FreeDictionaryPronunciation::new("https://api.example/entries/en/".into());
        assert_eq!(
            lookup.entry_url("ice cream"),
            "https://api.example/entries/en/ice%20cream"
        );
    }
}
