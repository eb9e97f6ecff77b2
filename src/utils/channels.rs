//! Channel bundles for inter-component communication
//!
//! All channels are bounded; the capture path drops chunks rather than
//! block the audio callback when the UI falls behind.

use crate::integration::{SessionCommand, SessionEvent};
use crossbeam_channel::{bounded, Receiver, Sender};

/// Channels for raw audio flowing from the capture callback to the UI
pub struct AudioChannels {
    pub raw_audio_tx: Sender<Vec<f32>>,
    pub raw_audio_rx: Receiver<Vec<f32>>,
}

impl AudioChannels {
    /// Create audio channels with the specified buffer size
    pub fn new(buffer_size: usize) -> Self {
        let (raw_audio_tx, raw_audio_rx) = bounded(buffer_size);

        Self {
            raw_audio_tx,
            raw_audio_rx,
        }
    }
}

/// Channels between the UI and the session worker
pub struct SessionChannels {
    pub command_tx: Sender<SessionCommand>,
    pub command_rx: Receiver<SessionCommand>,

    pub event_tx: Sender<SessionEvent>,
    pub event_rx: Receiver<SessionEvent>,
}

impl SessionChannels {
    /// Create session channels with the specified buffer size
    pub fn new(buffer_size: usize) -> Self {
        let (command_tx, command_rx) = bounded(buffer_size);
        let (event_tx, event_rx) = bounded(buffer_size);

        Self {
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_channels() {
        let channels = AudioChannels::new(10);

        channels.raw_audio_tx.send(vec![0.0, 0.1, 0.2]).unwrap();
        let received = channels.raw_audio_rx.recv().unwrap();
        assert_eq!(received, vec![0.0, 0.1, 0.2]);
    }

    #[test]
    fn test_session_channels() {
        let channels = SessionChannels::new(10);

        channels
            .command_tx
            .send(SessionCommand::ProcessQuery("Hello".to_string()))
            .unwrap();

        match channels.command_rx.recv().unwrap() {
            SessionCommand::ProcessQuery(text) => assert_eq!(text, "Hello"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bounded_capacity() {
        let channels = AudioChannels::new(50);

        // Fill up to buffer size without blocking
        for i in 0..50 {
            channels.raw_audio_tx.send(vec![i as f32]).unwrap();
        }
        assert!(channels.raw_audio_tx.try_send(vec![0.0]).is_err());
    }
}
