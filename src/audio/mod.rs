//! Audio capture and encoding for voice input
//!
//! Microphone samples stream from the capture callback into a bounded
//! [`RecordingBuffer`]; on stop, the buffer is drained, resampled to the
//! 16 kHz the recognition service expects, and written as a transient
//! mono 16-bit WAV file.

pub mod buffer;
#[cfg(feature = "audio-io")]
pub mod capture;
pub mod resampler;
pub mod wav;

pub use buffer::RecordingBuffer;
#[cfg(feature = "audio-io")]
pub use capture::AudioRecorder;
pub use resampler::{resample_audio, AudioResampler};
pub use wav::{read_wav, write_temp_wav, write_wav};
