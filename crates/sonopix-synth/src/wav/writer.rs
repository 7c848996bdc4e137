//! Core WAV writing and PCM conversion functions.

use std::io::{self, Write};

use super::format::WavFormat;

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes
///
/// # Returns
/// Result indicating success or I/O error
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus 8 bytes for RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(44 + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data).expect("writing to Vec should not fail");
    buffer
}

/// Converts mono f32 samples to interleaved stereo 16-bit PCM bytes.
///
/// Each sample is clamped to [-1, 1] and written identically to the left
/// and right channels, little-endian. Negative values scale by 0x8000 and
/// non-negative values by 0x7FFF, using the full dynamic range on both
/// sides of zero.
pub fn mono_to_stereo_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 4); // 2 channels * 2 bytes per sample

    for &sample in samples {
        let clipped = sample.clamp(-1.0, 1.0);
        let value = if clipped < 0.0 {
            (clipped * 0x8000 as f32) as i16
        } else {
            (clipped * 0x7FFF as f32) as i16
        };
        let bytes = value.to_le_bytes();
        pcm.extend_from_slice(&bytes); // left
        pcm.extend_from_slice(&bytes); // right
    }

    pcm
}
