//! Remote speech recognition for voice input
//!
//! Voice recordings are written to a temporary WAV file and submitted to a
//! hosted speech-recognition service. The result is a tagged
//! [`TranscriptionOutcome`] (recognized text, unintelligible audio, or a
//! service failure), so callers branch on the variant instead of
//! inspecting message text. The two failure variants carry fixed
//! user-facing sentinel messages.

pub mod transcribe;
pub mod worker;

pub use transcribe::{SpeechClient, SpeechConfig, TranscriptionOutcome};
pub use worker::{TranscriptionCommand, TranscriptionEvent, TranscriptionHandle, TranscriptionWorker};
