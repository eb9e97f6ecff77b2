//! Bounded recording buffer
//!
//! Accumulates microphone samples between record-start and record-stop.
//! Capacity is an explicit maximum buffered duration: when a recording is
//! left running past the bound, the oldest samples are dropped so only the
//! most recent window survives. That drop policy is the documented answer
//! to what happens when recording stays on indefinitely.

use parking_lot::Mutex;
use ringbuf::{traits::*, HeapRb};
use std::sync::Arc;

/// Maximum buffered recording duration in seconds
pub const MAX_RECORDING_SECS: usize = 120;

/// Thread-safe bounded buffer for recorded samples
///
/// Clones share the underlying buffer, so the capture callback can write
/// while the UI thread drains.
#[derive(Clone)]
pub struct RecordingBuffer {
    buffer: Arc<Mutex<HeapRb<f32>>>,
}

impl RecordingBuffer {
    /// Create a buffer holding `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(HeapRb::new(capacity))),
        }
    }

    /// Create a buffer bounded at [`MAX_RECORDING_SECS`] for the given rate
    pub fn for_sample_rate(sample_rate: u32) -> Self {
        Self::new(sample_rate as usize * MAX_RECORDING_SECS)
    }

    /// Write samples, dropping the oldest on overflow
    pub fn write(&self, samples: &[f32]) -> usize {
        let mut buffer = self.buffer.lock();

        for &sample in samples {
            if buffer.try_push(sample).is_err() {
                let _ = buffer.try_pop();
                let _ = buffer.try_push(sample);
            }
        }

        samples.len()
    }

    /// Drain every buffered sample in capture order
    pub fn drain(&self) -> Vec<f32> {
        let mut buffer = self.buffer.lock();
        let mut samples = Vec::with_capacity(buffer.occupied_len());

        while let Some(sample) = buffer.try_pop() {
            samples.push(sample);
        }

        samples
    }

    /// Clear all samples
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    /// Number of samples currently buffered
    pub fn len(&self) -> usize {
        self.buffer.lock().occupied_len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Maximum number of samples the buffer can hold
    pub fn capacity(&self) -> usize {
        self.buffer.lock().capacity().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = RecordingBuffer::new(1024);
        assert_eq!(buffer.capacity(), 1024);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_write_then_drain() {
        let buffer = RecordingBuffer::new(1024);
        let data: Vec<f32> = (0..100).map(|i| i as f32).collect();

        assert_eq!(buffer.write(&data), 100);
        assert_eq!(buffer.len(), 100);

        let drained = buffer.drain();
        assert_eq!(drained, data);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_overflow_keeps_most_recent_window() {
        let buffer = RecordingBuffer::new(10);
        let data: Vec<f32> = (0..25).map(|i| i as f32).collect();

        buffer.write(&data);

        let drained = buffer.drain();
        assert_eq!(drained.len(), 10);
        let expected: Vec<f32> = (15..25).map(|i| i as f32).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_capacity_from_sample_rate() {
        let buffer = RecordingBuffer::for_sample_rate(16_000);
        assert_eq!(buffer.capacity(), 16_000 * MAX_RECORDING_SECS);
    }

    #[test]
    fn test_clear() {
        let buffer = RecordingBuffer::new(100);
        buffer.write(&[1.0, 2.0, 3.0]);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_clones_share_samples() {
        let writer = RecordingBuffer::new(100);
        let reader = writer.clone();

        writer.write(&[0.5, 0.25]);
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.drain(), vec![0.5, 0.25]);
        assert!(writer.is_empty());
    }
}
