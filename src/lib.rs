pub mod audio;
pub mod integration;
pub mod llm;
pub mod session;
pub mod speech;
pub mod ui;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MediError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Transcription error: {0}")]
    TranscriptionError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for MediError {
    fn from(e: std::io::Error) -> Self {
        MediError::IOError(e.to_string())
    }
}

impl MediError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            MediError::AudioDeviceError(_) => false,
            // These are typically transient errors
            MediError::AudioProcessingError(_) => true,
            MediError::GenerationError(_) => true,
            MediError::TranscriptionError(_) => true,
            MediError::IOError(_) => false,
            MediError::ConfigError(_) => false,
            MediError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            MediError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone.".to_string()
            }
            MediError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            MediError::GenerationError(_) => {
                "Response generation failed. Please try again.".to_string()
            }
            MediError::TranscriptionError(_) => {
                "Speech recognition failed. Please try again.".to_string()
            }
            MediError::IOError(_) => "File system error occurred.".to_string(),
            MediError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            MediError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MediError>;
