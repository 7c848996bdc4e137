//! WAV encoding result type.

use serde::{Deserialize, Serialize};

use super::format::WavFormat;
use super::writer::{mono_to_stereo_pcm16, write_wav_to_vec};

/// Result of WAV encoding.
///
/// Owns the finished container bytes; ownership transfers to the caller
/// when the job result is delivered (moved, never copied).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload (for determinism validation).
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples per channel.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono samples into the fixed stereo 16-bit container.
    pub fn from_mono(samples: &[f32], sample_rate: u32) -> Self {
        let pcm = mono_to_stereo_pcm16(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let format = WavFormat::stereo(sample_rate);
        let wav_data = write_wav_to_vec(&format, &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
