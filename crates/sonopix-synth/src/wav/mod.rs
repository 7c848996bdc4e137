//! Deterministic WAV container writer.
//!
//! Serializes the mono float PCM produced by the engine into a stereo
//! 16-bit linear-PCM RIFF/WAVE file with no timestamps or variable
//! metadata, so identical input always yields byte-identical output. The
//! BLAKE3 hash of the PCM payload rides along for determinism validation.

mod format;
mod pcm;
mod result;
mod writer;


pub use format::{parse_header, WavFormat, WavHeader};
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{mono_to_stereo_pcm16, write_wav, write_wav_to_vec};
