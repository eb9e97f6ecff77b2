//! REST client for the remote text-generation service
//!
//! Speaks the `generateContent` wire format: the request carries the prompt
//! parts as one user content plus the fixed decoding parameters, and the
//! response carries candidates from which the first text part is taken.

use crate::llm::config::GeminiConfig;
use crate::llm::prompts::build_prompt_parts;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure modes of a generation request
///
/// Callers branch on the variant, never on message text. The session layer
/// turns any of these into a user-facing assistant turn.
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    /// The request never reached the service (connect, DNS, timeout)
    #[error("request failed: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The service answered but produced no text candidates
    #[error("no text in response candidates")]
    EmptyResponse,

    /// The response body could not be parsed
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Client for the generation REST endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client with the given configuration
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Get the active configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Generate a response for the given user input
    ///
    /// Builds the fixed prompt frame around the input, submits it with the
    /// configured decoding parameters, and returns the generated text,
    /// whitespace-trimmed. No retry, no local timeout.
    pub async fn generate(&self, input: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: build_prompt_parts(input)
                    .into_iter()
                    .map(|text| Part { text })
                    .collect(),
            }],
            generation_config: GenerationConfigPayload::from_config(&self.config),
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        debug!("Sending generation request to model {}", self.config.model);

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            warn!("Generation request failed with status {}", status);
            return Err(map_http_error(status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let text = extract_text(parsed)?;
        debug!("Generation response: {} chars", text.len());

        Ok(text.trim().to_string())
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfigPayload,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigPayload {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: String,
}

impl GenerationConfigPayload {
    fn from_config(config: &GeminiConfig) -> Self {
        Self {
            temperature: config.generation.temperature,
            top_p: config.generation.top_p,
            top_k: config.generation.top_k,
            max_output_tokens: config.generation.max_output_tokens,
            response_mime_type: config.generation.response_mime_type.clone(),
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().find_map(|part| part.text))
        .ok_or(GenerationError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{}: {}", status_text, msg)
            }
        })
        .unwrap_or_else(|_| body.to_string());

    GenerationError::Service {
        status: status.as_u16(),
        message,
    }
}
