//! Client for the Generative Language `generateContent` endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use tracing::debug;

use super::generator::{GenerationError, TextGenerator};
use crate::config::GeminiConfig;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Synchronous facade over the async HTTP client so that callers outside a
/// Tokio context can request generations directly.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: Client,
    runtime: Runtime,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Client against a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| GenerationError::Backend(err.to_string()))?;
        let runtime = Runtime::new().map_err(|err| GenerationError::Runtime(err.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            runtime,
        })
    }

    /// Builds a client when an API key is configured.
    pub fn from_config(config: &GeminiConfig) -> Result<Option<Self>, GenerationError> {
        match config.api_key.as_deref() {
            Some(key) => {
                Self::with_base_url(key, config.model.clone(), config.base_url.clone()).map(Some)
            }
            None => Ok(None),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting generation");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| GenerationError::Backend(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Backend(err.to_string()))?;

        let text: String = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            Err(GenerationError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.runtime.block_on(self.generate_content(prompt))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
