//! Transcription worker thread
//!
//! Runs the speech client off the UI thread: the UI sends a path to a
//! finished recording and later polls for the outcome. The worker owns its
//! own tokio runtime to drive the async client.

use crate::speech::transcribe::{SpeechClient, SpeechConfig, TranscriptionOutcome};
use crate::{MediError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::PathBuf;
use std::thread::JoinHandle;
use tracing::{debug, error, info};

/// Commands accepted by the transcription worker
#[derive(Debug)]
pub enum TranscriptionCommand {
    /// Transcribe the WAV file at the given path
    Transcribe(PathBuf),

    /// Shut the worker down
    Shutdown,
}

/// Events emitted by the transcription worker
#[derive(Clone, Debug)]
pub enum TranscriptionEvent {
    /// A transcription finished with this outcome
    Result(TranscriptionOutcome),

    /// Worker has shut down
    Shutdown,
}

/// Handle for interacting with a running transcription worker
pub struct TranscriptionHandle {
    /// Send commands to the worker
    pub command_tx: Sender<TranscriptionCommand>,
    /// Receive events from the worker
    pub event_rx: Receiver<TranscriptionEvent>,
    worker_handle: Option<JoinHandle<()>>,
}

impl TranscriptionHandle {
    /// Request transcription of a recording
    pub fn transcribe(&self, path: PathBuf) -> Result<()> {
        self.command_tx
            .send(TranscriptionCommand::Transcribe(path))
            .map_err(|e| MediError::ChannelError(format!("Failed to send transcribe command: {}", e)))
    }

    /// Try to receive an event without blocking
    pub fn try_recv_event(&self) -> Option<TranscriptionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Shut the worker down and wait for it to finish
    pub fn shutdown(mut self) -> Result<()> {
        let _ = self.command_tx.send(TranscriptionCommand::Shutdown);
        if let Some(handle) = self.worker_handle.take() {
            handle
                .join()
                .map_err(|_| MediError::TranscriptionError("Worker thread panicked".to_string()))?;
        }
        Ok(())
    }
}

/// Spawns the worker thread that services transcription requests
pub struct TranscriptionWorker {
    config: SpeechConfig,
}

impl TranscriptionWorker {
    /// Create a worker with the given configuration
    pub fn new(config: SpeechConfig) -> Self {
        Self { config }
    }

    /// Start the worker thread
    ///
    /// Returns a handle for sending commands and receiving events.
    pub fn start_worker(self) -> Result<TranscriptionHandle> {
        let (command_tx, command_rx) = bounded::<TranscriptionCommand>(16);
        let (event_tx, event_rx) = bounded::<TranscriptionEvent>(16);

        let config = self.config;

        let worker_handle = std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(TranscriptionEvent::Result(
                        TranscriptionOutcome::ServiceError(e.to_string()),
                    ));
                    let _ = event_tx.send(TranscriptionEvent::Shutdown);
                    return;
                }
            };

            let client = SpeechClient::new(config);
            info!("Transcription worker started");

            loop {
                match command_rx.recv() {
                    Ok(TranscriptionCommand::Transcribe(path)) => {
                        debug!("Transcribing recording at {:?}", path);
                        let outcome = runtime.block_on(client.transcribe_file(&path));

                        if event_tx.send(TranscriptionEvent::Result(outcome)).is_err() {
                            error!("Event channel closed, stopping worker");
                            break;
                        }
                    }
                    Ok(TranscriptionCommand::Shutdown) => {
                        info!("Transcription worker shutting down");
                        break;
                    }
                    Err(_) => {
                        info!("Command channel closed, stopping worker");
                        break;
                    }
                }
            }

            let _ = event_tx.send(TranscriptionEvent::Shutdown);
            info!("Transcription worker stopped");
        });

        Ok(TranscriptionHandle {
            command_tx,
            event_rx,
            worker_handle: Some(worker_handle),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_startup_and_shutdown() {
        let worker = TranscriptionWorker::new(SpeechConfig::new("test-key"));
        let handle = worker.start_worker().unwrap();

        assert!(handle.shutdown().is_ok());
    }

    #[test]
    fn test_missing_recording_yields_service_error() {
        let worker = TranscriptionWorker::new(SpeechConfig::new("test-key"));
        let handle = worker.start_worker().unwrap();

        handle
            .transcribe(PathBuf::from("/nonexistent/recording.wav"))
            .unwrap();

        let event = handle
            .event_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        match event {
            TranscriptionEvent::Result(outcome) => {
                assert!(matches!(outcome, TranscriptionOutcome::ServiceError(_)));
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let _ = handle.shutdown();
    }
}
