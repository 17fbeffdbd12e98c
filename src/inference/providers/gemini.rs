//! Gemini provider implementation using the generateContent REST endpoint.
//!
//! One prompt in, one completed candidate out; no streaming. The request
//! shape is the minimal `contents[].parts[].text` form; the response is
//! reduced to the concatenated text parts of the first candidate.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{ProviderError, TextProvider};

// ============================================================================
// Gemini generateContent API Types
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone)]
struct Part {
    text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct Content {
    parts: Vec<Part>,
}

/// The request body for generateContent.
#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate. `None` when the response
    /// carries no usable text (empty candidates, safety block, etc.).
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        (!text.is_empty()).then_some(text)
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini provider (generateContent endpoint).
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// `base_url` falls back to the public Generative Language endpoint;
    /// tests inject a mock server URL here.
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| crate::core::config::DEFAULT_GEMINI_BASE_URL.to_string());
        Self {
            api_key,
            base_url,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Config(
                "Gemini API key is not set (config file or GEMINI_API_KEY env var)".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        info!(
            "Gemini generateContent request: model={}, prompt_len={}",
            self.model,
            prompt.len()
        );

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        match body.first_text() {
            Some(text) => {
                info!("Gemini response: {} chars", text.len());
                Ok(text)
            }
            None => {
                warn!("Gemini response contained no text");
                Err(ProviderError::Parse(
                    "response contained no text".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_concatenates_parts() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: vec![
                        Part { text: "Hello ".to_string() },
                        Part { text: "world".to_string() },
                    ],
                }),
            }],
        };
        assert_eq!(response.first_text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_first_text_empty_candidates() {
        let response = GenerateContentResponse { candidates: vec![] };
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_first_text_missing_content() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate { content: None }],
        };
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi".to_string() }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }
}
