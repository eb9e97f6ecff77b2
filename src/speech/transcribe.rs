//! REST client for the remote speech-recognition service
//!
//! Submits a full recording as base64-encoded 16-bit PCM with a LINEAR16
//! recognition config and maps the response onto [`TranscriptionOutcome`].

use crate::audio::wav;
use crate::{MediError, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable holding the speech service credential
pub const API_KEY_ENV: &str = "SPEECH_API_KEY";

/// Default endpoint of the speech-recognition REST API
pub const DEFAULT_ENDPOINT: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Sample rate the recognition service expects
pub const RECOGNITION_SAMPLE_RATE: u32 = 16_000;

/// Outcome of a transcription request
///
/// Exactly three cases: recognized speech, audio the service could not
/// understand, and a failed service call. The failure variants map onto
/// fixed sentinel messages for display; code must branch on the variant,
/// never on the message text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    /// The service recognized speech
    Recognized(String),

    /// The service answered but produced no transcript
    Unintelligible,

    /// The call itself failed (network, auth, quota)
    ServiceError(String),
}

impl TranscriptionOutcome {
    /// Sentinel shown when audio was present but not understood
    pub const UNINTELLIGIBLE_MESSAGE: &'static str = "Sorry, I couldn't understand what you said.";

    /// Sentinel shown when the recognition service could not be reached
    pub const SERVICE_ERROR_MESSAGE: &'static str =
        "Sorry, there was an error with the speech recognition service.";

    /// Check whether speech was recognized
    pub fn is_recognized(&self) -> bool {
        matches!(self, TranscriptionOutcome::Recognized(_))
    }

    /// Get the recognized text, if any
    pub fn recognized_text(&self) -> Option<&str> {
        match self {
            TranscriptionOutcome::Recognized(text) => Some(text),
            _ => None,
        }
    }

    /// User-facing message for this outcome
    pub fn user_message(&self) -> &str {
        match self {
            TranscriptionOutcome::Recognized(text) => text,
            TranscriptionOutcome::Unintelligible => Self::UNINTELLIGIBLE_MESSAGE,
            TranscriptionOutcome::ServiceError(_) => Self::SERVICE_ERROR_MESSAGE,
        }
    }
}

/// Configuration for the speech-recognition client
#[derive(Clone, Debug)]
pub struct SpeechConfig {
    /// API credential, supplied via environment
    pub api_key: String,

    /// Endpoint URL of the recognition service
    pub endpoint: String,

    /// Language to recognize
    pub language_code: String,

    /// Sample rate of submitted audio in Hz
    pub sample_rate: u32,
}

impl SpeechConfig {
    /// Create a configuration with the given credential and defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language_code: "en-US".to_string(),
            sample_rate: RECOGNITION_SAMPLE_RATE,
        }
    }

    /// Load the credential from the environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            MediError::ConfigError(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        Ok(Self::new(api_key))
    }

    /// Override the endpoint (used by tests against a local server)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the language
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }
}

/// Client for the speech-recognition REST endpoint
#[derive(Clone)]
pub struct SpeechClient {
    client: Client,
    config: SpeechConfig,
}

impl SpeechClient {
    /// Create a client with the given configuration
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Transcribe a mono 16 kHz 16-bit PCM WAV file
    ///
    /// Reads the full recording, submits it in one request, and collapses
    /// every failure mode into one of the two failure variants. Never
    /// panics and never returns an error past this boundary.
    pub async fn transcribe_file(&self, path: &Path) -> TranscriptionOutcome {
        let (samples, sample_rate, channels) = match wav::read_wav(path) {
            Ok(audio) => audio,
            Err(e) => {
                warn!("Failed to read recording {:?}: {}", path, e);
                return TranscriptionOutcome::ServiceError(e.to_string());
            }
        };

        if channels != 1 || sample_rate != self.config.sample_rate {
            warn!(
                "Unexpected recording format: {} Hz, {} channel(s)",
                sample_rate, channels
            );
        }

        debug!(
            "Transcribing {:.2}s of audio from {:?}",
            samples.len() as f32 / sample_rate as f32,
            path
        );

        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16".to_string(),
                sample_rate_hertz: self.config.sample_rate,
                language_code: self.config.language_code.clone(),
            },
            audio: RecognitionAudio {
                content: BASE64_STANDARD.encode(encode_pcm16(&samples)),
            },
        };

        self.send_request(&request).await
    }

    async fn send_request(&self, request: &RecognizeRequest) -> TranscriptionOutcome {
        let url = format!("{}?key={}", self.config.endpoint, self.config.api_key);

        let response = match self.client.post(url).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Speech recognition request failed: {}", e);
                return TranscriptionOutcome::ServiceError(e.to_string());
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Speech recognition service returned {}", status);
            return TranscriptionOutcome::ServiceError(format!("{}: {}", status, body));
        }

        match response.json::<RecognizeResponse>().await {
            Ok(parsed) => map_response(parsed),
            Err(e) => {
                warn!("Failed to parse recognition response: {}", e);
                TranscriptionOutcome::ServiceError(e.to_string())
            }
        }
    }
}

/// Convert f32 samples to little-endian 16-bit PCM bytes
fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Map a recognition response onto an outcome
///
/// An answered request with no transcript is unintelligible audio, not an
/// error: the service processed the recording and found nothing to say.
fn map_response(response: RecognizeResponse) -> TranscriptionOutcome {
    let transcript = response
        .results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|result| result.alternatives)
        .flatten()
        .find_map(|alternative| alternative.transcript)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    match transcript {
        Some(text) => TranscriptionOutcome::Recognized(text),
        None => TranscriptionOutcome::Unintelligible,
    }
}

#[derive(Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: String,
    sample_rate_hertz: u32,
    language_code: String,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    results: Option<Vec<RecognitionResult>>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    alternatives: Option<Vec<RecognitionAlternative>>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    transcript: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_response(json: &str) -> RecognizeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_map_response_with_transcript() {
        let response = parse_response(
            r#"{"results": [{"alternatives": [{"transcript": "hello there"}]}]}"#,
        );

        let outcome = map_response(response);
        assert_eq!(
            outcome,
            TranscriptionOutcome::Recognized("hello there".to_string())
        );
        assert_ne!(
            outcome.user_message(),
            TranscriptionOutcome::UNINTELLIGIBLE_MESSAGE
        );
        assert_ne!(
            outcome.user_message(),
            TranscriptionOutcome::SERVICE_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_map_response_no_results_is_unintelligible() {
        // Silence or noise: the service answers with no results
        let outcome = map_response(parse_response(r#"{}"#));
        assert_eq!(outcome, TranscriptionOutcome::Unintelligible);
        assert_eq!(
            outcome.user_message(),
            TranscriptionOutcome::UNINTELLIGIBLE_MESSAGE
        );
    }

    #[test]
    fn test_map_response_empty_results_is_unintelligible() {
        let outcome = map_response(parse_response(r#"{"results": []}"#));
        assert_eq!(outcome, TranscriptionOutcome::Unintelligible);
    }

    #[test]
    fn test_map_response_blank_transcript_is_unintelligible() {
        let outcome = map_response(parse_response(
            r#"{"results": [{"alternatives": [{"transcript": "  "}]}]}"#,
        ));
        assert_eq!(outcome, TranscriptionOutcome::Unintelligible);
    }

    #[test]
    fn test_outcome_accessors() {
        let recognized = TranscriptionOutcome::Recognized("hi".to_string());
        assert!(recognized.is_recognized());
        assert_eq!(recognized.recognized_text(), Some("hi"));

        let failed = TranscriptionOutcome::ServiceError("timeout".to_string());
        assert!(!failed.is_recognized());
        assert_eq!(failed.recognized_text(), None);
        assert_eq!(
            failed.user_message(),
            TranscriptionOutcome::SERVICE_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_encode_pcm16_clamps() {
        let bytes = encode_pcm16(&[0.0, 1.0, -1.0, 2.0]);
        assert_eq!(bytes.len(), 8);

        let full_scale = i16::from_le_bytes([bytes[2], bytes[3]]);
        assert_eq!(full_scale, i16::MAX);

        // Out-of-range input clamps to full scale
        let clamped = i16::from_le_bytes([bytes[6], bytes[7]]);
        assert_eq!(clamped, i16::MAX);
    }

    #[test]
    fn test_speech_config_builder() {
        let config = SpeechConfig::new("key")
            .with_endpoint("http://localhost:9000/recognize")
            .with_language("en-GB");

        assert_eq!(config.endpoint, "http://localhost:9000/recognize");
        assert_eq!(config.language_code, "en-GB");
        assert_eq!(config.sample_rate, RECOGNITION_SAMPLE_RATE);
    }

    #[test]
    fn test_transcribe_missing_file_is_service_error() {
        let client = SpeechClient::new(SpeechConfig::new("key"));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let outcome =
            runtime.block_on(client.transcribe_file(Path::new("/nonexistent/recording.wav")));
        assert!(matches!(outcome, TranscriptionOutcome::ServiceError(_)));
    }
}
