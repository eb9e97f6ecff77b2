//! WAV encoding for recordings handed to the recognition service
//!
//! Recordings are written as mono 16-bit PCM. The transient file produced
//! by [`write_temp_wav`] lives only as long as its handle: dropping the
//! handle after transcription removes the file.

use crate::{MediError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write mono audio samples to a 16-bit PCM WAV file
///
/// # Arguments
/// * `path` - Path to the output WAV file
/// * `samples` - Audio samples (f32, range -1.0 to 1.0)
/// * `sample_rate` - Sample rate in Hz
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)
        .map_err(|e| MediError::IOError(format!("Failed to create WAV writer: {}", e)))?;

    for &sample in samples {
        let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| MediError::IOError(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| MediError::IOError(format!("Failed to finalize WAV file: {}", e)))?;

    debug!(
        "Wrote {} samples to WAV file: {:?}",
        samples.len(),
        path.as_ref()
    );
    Ok(())
}

/// Write a recording to a transient WAV file
///
/// The file is removed when the returned handle drops, so callers keep the
/// handle alive until transcription has finished with the path.
pub fn write_temp_wav(samples: &[f32], sample_rate: u32) -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix("mediassist-recording-")
        .suffix(".wav")
        .tempfile()
        .map_err(|e| MediError::IOError(format!("Failed to create temp file: {}", e)))?;

    write_wav(file.path(), samples, sample_rate)?;

    info!(
        "Wrote {:.2}s recording to {:?}",
        samples.len() as f32 / sample_rate as f32,
        file.path()
    );

    Ok(file)
}

/// Read audio samples from a WAV file
///
/// # Returns
/// * Tuple of (samples, sample_rate, channels)
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32, u16)> {
    let mut reader = WavReader::open(path.as_ref())
        .map_err(|e| MediError::IOError(format!("Failed to open WAV file: {}", e)))?;

    let spec = reader.spec();

    debug!(
        "Reading WAV file: {} Hz, {} channels, {} bits",
        spec.sample_rate, spec.channels, spec.bits_per_sample
    );

    let samples: Result<Vec<f32>> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map_err(|e| MediError::IOError(format!("Failed to read sample: {}", e))))
            .collect(),
        SampleFormat::Int => match spec.bits_per_sample {
            16 => reader
                .samples::<i16>()
                .map(|s| {
                    s.map(|sample| sample as f32 / i16::MAX as f32)
                        .map_err(|e| MediError::IOError(format!("Failed to read sample: {}", e)))
                })
                .collect(),
            32 => reader
                .samples::<i32>()
                .map(|s| {
                    s.map(|sample| sample as f32 / i32::MAX as f32)
                        .map_err(|e| MediError::IOError(format!("Failed to read sample: {}", e)))
                })
                .collect(),
            other => {
                return Err(MediError::AudioProcessingError(format!(
                    "Unsupported bit depth: {}",
                    other
                )));
            }
        },
    };

    let samples = samples?;

    Ok((samples, spec.sample_rate, spec.channels))
}
