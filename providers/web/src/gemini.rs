use std::time::Duration;

use async_trait::async_trait;
use lexis_backend::{GenerateError, Generator, prompt_for, validate_sections};
use lexis_config::generation::GenerationConfig;
use serde::{Deserialize, Serialize};

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const CONNECTION_CHECK_PROMPT: &str =
    "Hello, please respond with the word \"working\" if you can see this message.";

#[derive(Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }

    /// Client with the configured per-request timeout
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
        })
    }

    async fn send(&self, prompt: &str) -> Result<String, GenerateError> {
        if self.api_key.trim().is_empty() {
            return Err(GenerateError::Configuration);
        }

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(GenerateError::RateLimited);
        }

        if !status.is_success() {
            let body: GenerateResponse = response.json().await.unwrap_or_default();
            let message = body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            tracing::error!("Gemini HTTP error {}: {}", status, message);
            if status == 404 {
                return Err(GenerateError::NotFound(message));
            }
            return Err(GenerateError::Api(message));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            GenerateError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        body.into_text()
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, word: &str) -> Result<String, GenerateError> {
        tracing::info!("Fetching definition for word: {}", word);

        let text = self.send(&prompt_for(word)).await?;
        validate_sections(&text)?;

        tracing::debug!("Received {} bytes for {}", text.len(), word);
        Ok(text)
    }

    async fn check_connection(&self) -> bool {
        match self.send(CONNECTION_CHECK_PROMPT).await {
            Ok(_) => {
                tracing::info!("Gemini connection check succeeded");
                true
            }
            Err(e) => {
                tracing::error!("Gemini connection check failed: {}", e);
                false
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    safety_settings: Vec<SafetySetting>,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl GenerateResponse {
    fn into_text(self) -> Result<String, GenerateError> {
        if let Some(error) = self.error {
            let message = if error.message.is_empty() {
                "Failed to get definition from Gemini".to_string()
            } else {
                error.message
            };
            return Err(GenerateError::Api(message));
        }

        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                GenerateError::InvalidResponse("Invalid response format from Gemini API".into())
            })
    }
}
