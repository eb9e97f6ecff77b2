//! Sample-rate conversion for recorded audio
//!
//! Capture devices run at their native rate (typically 44.1 or 48 kHz);
//! the recognition service wants 16 kHz. Recordings are already mono by
//! the time they reach the resampler.

use crate::{MediError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

/// Mono audio resampler
pub struct AudioResampler {
    resampler: SincFixedIn<f32>,
    input_rate: u32,
    output_rate: u32,
}

impl AudioResampler {
    /// Create a resampler between the two rates
    pub fn new(input_rate: u32, output_rate: u32) -> Result<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(MediError::ConfigError(
                "Sample rates must be greater than 0".into(),
            ));
        }

        let resample_ratio = output_rate as f64 / input_rate as f64;

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let chunk_size = 1024;

        let resampler = SincFixedIn::<f32>::new(resample_ratio, 2.0, params, chunk_size, 1)
            .map_err(|e| {
                MediError::AudioProcessingError(format!("Failed to create resampler: {}", e))
            })?;

        debug!("Created resampler: {} Hz -> {} Hz", input_rate, output_rate);

        Ok(Self {
            resampler,
            input_rate,
            output_rate,
        })
    }

    /// Resample a full mono recording
    pub fn resample(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = self.resampler.input_frames_max();
        let ratio = self.output_rate as f64 / self.input_rate as f64;
        let mut output = Vec::with_capacity((input.len() as f64 * ratio * 1.1) as usize);

        let mut offset = 0;
        while offset < input.len() {
            let remaining = input.len() - offset;
            let to_read = remaining.min(chunk_size);

            // SincFixedIn requires exactly chunk_size frames; the tail of
            // the final chunk is zero-padded
            let mut chunk = vec![0.0f32; chunk_size];
            chunk[..to_read].copy_from_slice(&input[offset..offset + to_read]);

            let resampled = self
                .resampler
                .process(&[chunk], None)
                .map_err(|e| MediError::AudioProcessingError(format!("Resampling failed: {}", e)))?;

            // Only keep the portion that corresponds to real input on the
            // padded final chunk
            let produced = resampled[0].len();
            let to_take = if remaining < chunk_size {
                ((to_read as f64) * ratio).ceil() as usize
            } else {
                produced
            };

            output.extend_from_slice(&resampled[0][..to_take.min(produced)]);
            offset += to_read;
        }

        debug!("Resampled {} samples -> {}", input.len(), output.len());

        Ok(output)
    }

    /// Input sample rate
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Output sample rate
    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }
}

/// Resample a mono recording in one step
///
/// Returns the input unchanged when the rates already match.
pub fn resample_audio(input: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>> {
    if input_rate == output_rate {
        return Ok(input.to_vec());
    }

    let mut resampler = AudioResampler::new(input_rate, output_rate)?;
    resampler.resample(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resampler_creation() {
        assert!(AudioResampler::new(48000, 16000).is_ok());
    }

    #[test]
    fn test_invalid_rates() {
        assert!(AudioResampler::new(0, 16000).is_err());
        assert!(AudioResampler::new(48000, 0).is_err());
    }

    #[test]
    fn test_downsampling_shrinks_output() {
        let mut resampler = AudioResampler::new(48000, 16000).unwrap();
        let input: Vec<f32> = (0..4800).map(|i| (i as f32 * 0.01).sin()).collect();

        let output = resampler.resample(&input).unwrap();
        assert!(!output.is_empty());
        assert!(output.len() < input.len());
    }

    #[test]
    fn test_matching_rates_pass_through() {
        let input = vec![0.1, 0.2, 0.3];
        let output = resample_audio(&input, 16000, 16000).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_empty_input() {
        let mut resampler = AudioResampler::new(48000, 16000).unwrap();
        assert!(resampler.resample(&[]).unwrap().is_empty());
    }
}
