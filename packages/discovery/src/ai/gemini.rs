//! Gemini implementation of the generation trait.
//!
//! Talks to the `generateContent` REST endpoint directly. The response
//! text is returned verbatim; callers run it through the JSON
//! extractor because the provider routinely wraps payloads in prose or
//! markdown fences.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{DiscoveryError, Result};
use crate::traits::GenerativeModel;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini-backed generation client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DiscoveryError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| DiscoveryError::Config("GEMINI_API_KEY not set".to_string()))?;
        Self::new(api_key)
    }

    /// Set the model id (default: gemini-1.5-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Current model id.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(&self, prompt: &str, model: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(
            prompt_length = prompt.len(),
            model = model,
            "Calling Gemini generateContent"
        );

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent?key={}",
                self.base_url, model, self.api_key
            ))
            .json(&request)
            .send()
            .await
            .map_err(|e| DiscoveryError::Provider(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::provider(format!(
                "Gemini API error {status}: {body}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::Provider(Box::new(e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| DiscoveryError::provider("empty Gemini response"))?;

        tracing::debug!(response_length = text.len(), model = model, "Gemini response received");
        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt, &self.model).await
    }

    async fn generate_with_model(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        self.generate_content(prompt, model.unwrap_or(&self.model))
            .await
    }
}

// Wire types for the generateContent endpoint.

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_builder() {
        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_model("gemini-1.5-pro")
            .with_base_url("https://proxy.internal/v1beta");

        assert_eq!(client.model(), "gemini-1.5-pro");
        assert_eq!(client.base_url, "https://proxy.internal/v1beta");
    }

    #[test]
    fn test_response_deserializes() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "hello"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "hello");
    }
}
