//! Gemini REST transport.
//!
//! `TextGenerator` is the seam between the dispatcher and the outside
//! world: one trait call is exactly one request to the generation service.
//! `GeminiClient` is the production implementation; tests substitute a
//! scripted generator.

use crate::config::GenerationOptions;
use crate::error::GenerationError;
use crate::models::{Model, OUTPUT_TOKEN_CAP};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A single immutable generation request.
///
/// Generation parameters are clamped at construction; once issued, a
/// request is never modified.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: Model,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    /// Build a request for one prompt, clamping temperature to [0.1, 1.0]
    /// and the output-token cap to the hard ceiling.
    pub fn new(prompt: impl Into<String>, options: &GenerationOptions) -> Self {
        Self {
            prompt: prompt.into(),
            model: options.model,
            temperature: options.temperature.clamp(0.1, 1.0),
            max_output_tokens: options.max_output_tokens.min(OUTPUT_TOKEN_CAP),
        }
    }

    /// Whitespace-delimited word count of the prompt
    pub fn word_count(&self) -> usize {
        self.prompt.split_whitespace().count()
    }
}

/// One call to the external text-generation service.
///
/// Implementations perform exactly one request per invocation and surface
/// service errors unmodified, except that quota exhaustion is mapped to
/// `GenerationError::QuotaExceeded` so callers can stop retrying.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Production client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with the caller-supplied API credential.
    ///
    /// The credential is opaque; only non-emptiness is enforced here.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "API key is required".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (local proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: Model) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model.id())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        debug!(
            model = request.model.id(),
            words = request.word_count(),
            max_tokens = request.max_output_tokens,
            "issuing generation request"
        );

        let response = self
            .http
            .post(self.endpoint(request.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error_body: ApiErrorEnvelope = serde_json::from_str(&body).unwrap_or_default();
            let message = error_body.error.message;
            warn!(status = status.as_u16(), %message, "generation request failed");

            if status.as_u16() == 429
                || error_body.error.status == "RESOURCE_EXHAUSTED"
                || message.to_lowercase().contains("quota")
            {
                return Err(GenerationError::QuotaExceeded);
            }

            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: "response contained no generated text".to_string(),
            });
        }

        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    // Safety-blocked candidates come back without content
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize, Default)]
struct ApiErrorEnvelope {
    #[serde(default)]
    error: ApiError,
}

#[derive(Deserialize, Default)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_clamps_generation_parameters() {
        let options = GenerationOptions {
            temperature: 1.7,
            max_output_tokens: 10_000,
            ..GenerationOptions::default()
        };
        let request = GenerationRequest::new("a prompt", &options);
        assert!((request.temperature - 1.0).abs() < f32::EPSILON);
        assert_eq!(request.max_output_tokens, OUTPUT_TOKEN_CAP);

        let options = GenerationOptions {
            temperature: 0.0,
            ..GenerationOptions::default()
        };
        let request = GenerationRequest::new("a prompt", &options);
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(GeminiClient::new("   ").is_err());
        assert!(GeminiClient::new("caller-supplied-key").is_ok());
    }
}
