//! Synchronous generation facade
//!
//! The conversation session invokes the generator synchronously; the worker
//! thread that owns it is suspended for the duration of the remote call.
//! [`ResponseGenerator`] is the seam that lets tests substitute a stub.

use crate::llm::client::{GeminiClient, GenerationError};
use crate::llm::config::GeminiConfig;
use crate::{MediError, Result};
use tracing::info;

/// Turns user input into generated response text
pub trait ResponseGenerator: Send {
    /// Generate a response for the given input
    ///
    /// Blocks for the duration of the call. Implementations must return a
    /// [`GenerationError`] rather than panic for any failure mode.
    fn generate(&self, input: &str) -> std::result::Result<String, GenerationError>;
}

/// Production generator backed by the remote REST client
///
/// Owns a current-thread tokio runtime so the async client can be driven
/// from the synchronous worker thread that holds the generator.
pub struct GeminiGenerator {
    client: GeminiClient,
    runtime: tokio::runtime::Runtime,
}

impl GeminiGenerator {
    /// Create a generator from the given configuration
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| MediError::GenerationError(format!("Failed to create runtime: {}", e)))?;

        info!("Generation client ready for model {}", config.model);

        Ok(Self {
            client: GeminiClient::new(config),
            runtime,
        })
    }
}

impl ResponseGenerator for GeminiGenerator {
    fn generate(&self, input: &str) -> std::result::Result<String, GenerationError> {
        self.runtime.block_on(self.client.generate(input))
    }
}
