//! Remote text generation for the healthcare assistant
//!
//! This module provides the response-generation side of MediAssist:
//!
//! - **config**: Service endpoint, credential, and decoding parameters
//! - **prompts**: The fixed role instruction and identity examples that
//!   frame every request
//! - **client**: The async REST client for the `generateContent` endpoint
//! - **generator**: A synchronous [`ResponseGenerator`] facade used by the
//!   conversation session (and stubbed out in tests)
//!
//! Every request carries the same prompt frame and the same fixed decoding
//! parameters; no state is kept between calls. Failures surface as a
//! structured [`GenerationError`] and never panic past this module.

pub mod client;
pub mod config;
pub mod generator;
pub mod prompts;

// Re-export commonly used types
pub use client::{GeminiClient, GenerationError};
pub use config::{GeminiConfig, GenerationConfig};
pub use generator::{GeminiGenerator, ResponseGenerator};
pub use prompts::{build_prompt_parts, IDENTITY_EXAMPLES, ROLE_INSTRUCTION};
