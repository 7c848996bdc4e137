//! WAV format parameters and header parsing.

/// WAV format parameters.
///
/// The output container is fixed at stereo 16-bit PCM; the struct keeps the
/// fields explicit so the header math reads off the RIFF layout directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (always 2 for this encoder).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 for this encoder).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates the stereo 16-bit format used for all output.
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Block align (bytes per sample frame across all channels).
    pub(crate) fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Byte rate (bytes per second).
    pub(crate) fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Fields recovered from a WAV header, used to verify round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Audio format tag (1 = linear PCM).
    pub audio_format: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Size of the data chunk payload in bytes.
    pub data_size: u32,
}

/// Parses the canonical 44-byte header this encoder emits.
///
/// Returns `None` when the magic strings or chunk layout don't match.
pub fn parse_header(wav_data: &[u8]) -> Option<WavHeader> {
    if wav_data.len() < 44 {
        return None;
    }
    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }
    if &wav_data[12..16] != b"fmt " || &wav_data[36..40] != b"data" {
        return None;
    }

    let u16_at = |i: usize| u16::from_le_bytes([wav_data[i], wav_data[i + 1]]);
    let u32_at = |i: usize| {
        u32::from_le_bytes([
            wav_data[i],
            wav_data[i + 1],
            wav_data[i + 2],
            wav_data[i + 3],
        ])
    };

    if u32_at(16) != 16 {
        return None;
    }

    Some(WavHeader {
        audio_format: u16_at(20),
        channels: u16_at(22),
        sample_rate: u32_at(24),
        byte_rate: u32_at(28),
        block_align: u16_at(32),
        bits_per_sample: u16_at(34),
        data_size: u32_at(40),
    })
}
