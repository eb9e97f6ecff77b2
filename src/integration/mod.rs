//! Orchestration of the session and transcription workers
//!
//! The UI thread never blocks on a remote call: queries and recordings are
//! handed to worker threads over bounded channels, and the UI polls for
//! events each frame. Each submitted query issues at most one outbound
//! generation call; each finished recording issues at most one
//! transcription call. There is no retry, no local timeout, and no
//! cancellation: a hung service keeps its worker busy until it answers.

use crate::llm::config::GeminiConfig;
use crate::llm::generator::{GeminiGenerator, ResponseGenerator};
use crate::session::log::ChatSession;
use crate::speech::transcribe::SpeechConfig;
use crate::speech::worker::{
    TranscriptionEvent, TranscriptionHandle, TranscriptionWorker,
};
use crate::utils::channels::SessionChannels;
use crate::{MediError, Result};
use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::thread::JoinHandle;
use tracing::{debug, error, info, warn};

/// Commands accepted by the session worker
#[derive(Clone, Debug)]
pub enum SessionCommand {
    /// Process one submitted user input
    ProcessQuery(String),

    /// Reset the conversation to its seeded state
    ClearSession,

    /// Shut the worker down
    Shutdown,
}

/// Events emitted by the session worker
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// A generation request is in flight
    GenerationStarted,

    /// An assistant turn was appended with this content
    AssistantTurn { content: String },

    /// The conversation was reset
    SessionCleared,

    /// The worker failed to initialize
    Error(String),

    /// Worker has shut down
    Shutdown,
}

/// Configuration for the orchestrator
#[derive(Clone, Debug)]
pub struct IntegrationConfig {
    /// Generation service configuration
    pub gemini: GeminiConfig,

    /// Speech-recognition service configuration
    pub speech: SpeechConfig,

    /// Buffer size for command and event channels
    pub channel_buffer_size: usize,
}

impl IntegrationConfig {
    /// Create a configuration from explicit service configs
    pub fn new(gemini: GeminiConfig, speech: SpeechConfig) -> Self {
        Self {
            gemini,
            speech,
            channel_buffer_size: 16,
        }
    }

    /// Load both service credentials from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeminiConfig::from_env()?, SpeechConfig::from_env()?))
    }

    /// Set the channel buffer size
    pub fn with_channel_buffer_size(mut self, size: usize) -> Self {
        self.channel_buffer_size = size;
        self
    }
}

/// Handle for driving the workers from the UI
pub struct OrchestratorHandle {
    session: ChatSession,
    command_tx: Sender<SessionCommand>,
    event_rx: Receiver<SessionEvent>,
    transcription: TranscriptionHandle,
    worker_handle: Option<JoinHandle<()>>,
}

impl OrchestratorHandle {
    /// The shared conversation session
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Submit a user query for processing
    pub fn process_query(&self, text: impl Into<String>) -> Result<()> {
        self.command_tx
            .send(SessionCommand::ProcessQuery(text.into()))
            .map_err(|e| MediError::ChannelError(format!("Failed to send query: {}", e)))
    }

    /// Reset the conversation
    pub fn clear_session(&self) -> Result<()> {
        self.command_tx
            .send(SessionCommand::ClearSession)
            .map_err(|e| MediError::ChannelError(format!("Failed to send clear: {}", e)))
    }

    /// Try to receive a session event without blocking
    pub fn try_recv_session_event(&self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Request transcription of a finished recording
    pub fn transcribe(&self, path: PathBuf) -> Result<()> {
        self.transcription.transcribe(path)
    }

    /// Try to receive a transcription event without blocking
    pub fn try_recv_transcription_event(&self) -> Option<TranscriptionEvent> {
        self.transcription.try_recv_event()
    }

    /// Shut both workers down and wait for them to finish
    pub fn shutdown(mut self) -> Result<()> {
        let _ = self.command_tx.send(SessionCommand::Shutdown);
        if let Some(handle) = self.worker_handle.take() {
            handle
                .join()
                .map_err(|_| MediError::ChannelError("Session worker panicked".to_string()))?;
        }
        self.transcription.shutdown()
    }
}

/// Builds and starts the worker threads
pub struct Orchestrator {
    config: IntegrationConfig,
    generator: Option<Box<dyn ResponseGenerator>>,
}

impl Orchestrator {
    /// Create an orchestrator with the given configuration
    pub fn new(config: IntegrationConfig) -> Self {
        Self {
            config,
            generator: None,
        }
    }

    /// Substitute a response generator (used by tests)
    pub fn with_generator(mut self, generator: Box<dyn ResponseGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Start the session and transcription workers
    ///
    /// Returns a handle bundling the shared session, the command/event
    /// channels, and the transcription worker.
    pub fn start(self) -> Result<OrchestratorHandle> {
        let session = ChatSession::new();
        let channels = SessionChannels::new(self.config.channel_buffer_size);

        let worker_handle = spawn_session_worker(
            session.clone(),
            self.config.gemini.clone(),
            self.generator,
            channels.command_rx,
            channels.event_tx,
        );

        let transcription = TranscriptionWorker::new(self.config.speech.clone()).start_worker()?;

        info!("Orchestrator started");

        Ok(OrchestratorHandle {
            session,
            command_tx: channels.command_tx,
            event_rx: channels.event_rx,
            transcription,
            worker_handle: Some(worker_handle),
        })
    }
}

/// Session worker loop
///
/// Owns the generator; each `ProcessQuery` suspends this thread for the
/// duration of the remote call.
fn spawn_session_worker(
    session: ChatSession,
    gemini: GeminiConfig,
    injected: Option<Box<dyn ResponseGenerator>>,
    command_rx: Receiver<SessionCommand>,
    event_tx: Sender<SessionEvent>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let generator: Box<dyn ResponseGenerator> = match injected {
            Some(generator) => generator,
            None => match GeminiGenerator::new(gemini) {
                Ok(generator) => Box::new(generator),
                Err(e) => {
                    error!("Failed to initialize generator: {}", e);
                    let _ = event_tx.send(SessionEvent::Error(e.to_string()));
                    let _ = event_tx.send(SessionEvent::Shutdown);
                    return;
                }
            },
        };

        info!("Session worker started");

        loop {
            let command = match command_rx.recv() {
                Ok(cmd) => cmd,
                Err(_) => {
                    warn!("Command channel closed, stopping worker");
                    break;
                }
            };

            match command {
                SessionCommand::ProcessQuery(text) => {
                    if text.trim().is_empty() {
                        debug!("Ignoring empty query");
                        continue;
                    }

                    if event_tx.send(SessionEvent::GenerationStarted).is_err() {
                        error!("Event channel closed");
                        break;
                    }

                    if let Some(content) = session.process_user_query(&text, generator.as_ref()) {
                        if event_tx.send(SessionEvent::AssistantTurn { content }).is_err() {
                            error!("Event channel closed");
                            break;
                        }
                    }
                }

                SessionCommand::ClearSession => {
                    session.clear();
                    debug!("Session cleared");
                    let _ = event_tx.send(SessionEvent::SessionCleared);
                }

                SessionCommand::Shutdown => {
                    info!("Session worker shutting down");
                    break;
                }
            }
        }

        let _ = event_tx.send(SessionEvent::Shutdown);
        info!("Session worker stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_config_defaults() {
        let config =
            IntegrationConfig::new(GeminiConfig::new("gen-key"), SpeechConfig::new("speech-key"));
        assert_eq!(config.channel_buffer_size, 16);
    }

    #[test]
    fn test_integration_config_builder() {
        let config =
            IntegrationConfig::new(GeminiConfig::new("gen-key"), SpeechConfig::new("speech-key"))
                .with_channel_buffer_size(64);
        assert_eq!(config.channel_buffer_size, 64);
    }
}
