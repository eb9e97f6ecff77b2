//! Configuration for the remote text-generation service

use crate::{MediError, Result};

/// Default model served by the generation endpoint
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Base URL of the generation REST API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fixed decoding parameters sent with every generation request
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    /// Temperature for sampling (0.0 = deterministic, 1.0+ = creative)
    pub temperature: f32,

    /// Top-p (nucleus) sampling parameter
    pub top_p: f32,

    /// Top-k sampling parameter
    pub top_k: u32,

    /// Maximum tokens to generate per response
    pub max_output_tokens: u32,

    /// MIME type the service should use for the response body
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

/// Configuration for the generation service client
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API credential, supplied via environment
    pub api_key: String,

    /// Model identifier appended to the base URL
    pub model: String,

    /// Base URL of the REST endpoint
    pub base_url: String,

    /// Decoding parameters
    pub generation: GenerationConfig,
}

impl GeminiConfig {
    /// Create a configuration with the given credential and default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            generation: GenerationConfig::default(),
        }
    }

    /// Load the credential from the environment
    ///
    /// The key is never embedded in source; a missing variable is a
    /// configuration error reported at startup.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            MediError::ConfigError(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        Ok(Self::new(api_key))
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL (used by tests against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the decoding parameters
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_default() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.max_output_tokens, 8192);
        assert_eq!(config.response_mime_type, "text/plain");
    }

    #[test]
    fn test_config_builder() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-1.5-pro")
            .with_base_url("http://localhost:8080/models");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.base_url, "http://localhost:8080/models");
    }

    #[test]
    fn test_default_endpoint() {
        let config = GeminiConfig::new("key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
