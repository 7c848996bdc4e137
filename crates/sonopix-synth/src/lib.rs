//! Sonopix synthesis core.
//!
//! Converts a grayscale raster into audio whose spectrogram reproduces the
//! source image: rows map to frequencies, columns to time, and pixel
//! brightness to per-frequency amplitude. The per-row sinusoids are summed
//! sample by sample into a PCM buffer, normalized, and serialized into a
//! stereo 16-bit WAV container.
//!
//! # Determinism
//!
//! Synthesis is a pure function of the image and parameters: no clock, no
//! randomness. Identical inputs produce byte-identical WAV output, and the
//! BLAKE3 hash of the PCM payload rides along on every result for
//! validation.
//!
//! # Example
//!
//! ```ignore
//! use sonopix_spec::{ConversionParams, GrayscaleImage};
//! use sonopix_synth::SynthWorker;
//!
//! let image = GrayscaleImage::new(width, height, pixels)?;
//! let mut worker = SynthWorker::spawn();
//! let job = worker.submit(image, &ConversionParams::default());
//! match worker.wait(job) {
//!     sonopix_synth::JobOutcome::Completed(wav) => {
//!         std::fs::write("output.wav", &wav.wav_data)?;
//!     }
//!     other => eprintln!("job ended: {:?}", other.status()),
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - full pipeline: synthesize, normalize, encode
//! - [`engine`] - the additive-synthesis column loop
//! - [`freq`] - row-to-frequency mapping
//! - [`brightness`] - brightness-to-amplitude response curves
//! - [`smoothing`] - inter-column amplitude blending
//! - [`subsample`] - decimation of oversized inputs
//! - [`normalize`] - output peak normalization
//! - [`wav`] - deterministic WAV container writer
//! - [`job`] - background worker with progress, cancellation, and
//!   stale-result suppression

pub mod brightness;
pub mod engine;
pub mod error;
pub mod freq;
pub mod generate;
pub mod job;
pub mod normalize;
pub mod smoothing;
pub mod subsample;
pub mod wav;

// Re-export main types at crate root
pub use engine::EngineTuning;
pub use error::{SynthError, SynthResult};
pub use generate::{generate, GenerateResult};
pub use job::{JobOutcome, JobStatus, SynthWorker};
pub use wav::WavResult;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use rustfft::num_complex::Complex;
    use rustfft::FftPlanner;
    use sonopix_spec::{BrightnessCurve, ConversionParams, FrequencyScale, GrayscaleImage};

    /// Returns the frequency (Hz) of the strongest DFT bin.
    fn peak_frequency(samples: &[f32], sample_rate: u32) -> f32 {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(samples.len());
        let mut spectrum: Vec<Complex<f32>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft.process(&mut spectrum);

        let half = spectrum.len() / 2;
        let peak_bin = spectrum[..half]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm_sqr().total_cmp(&b.1.norm_sqr()))
            .map(|(i, _)| i)
            .unwrap();
        peak_bin as f32 * sample_rate as f32 / samples.len() as f32
    }

    fn scenario_params() -> ConversionParams {
        ConversionParams {
            duration_seconds: 1.0,
            min_frequency_hz: 100.0,
            max_frequency_hz: 1000.0,
            frequency_scale: FrequencyScale::Linear,
            sample_rate_hz: 8000,
            brightness_curve: BrightnessCurve::Linear,
            invert_image: false,
            smoothing: 0.0,
        }
    }

    #[test]
    fn test_two_by_two_spectral_content() {
        // Bright top-left pixel drives ~1000 Hz in the first half; bright
        // bottom-right pixel drives ~100 Hz in the second.
        let image = GrayscaleImage::new(2, 2, vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let buffer = engine::synthesize(
            &image,
            &scenario_params(),
            &EngineTuning::default(),
            |_| {},
            || false,
        )
        .unwrap();
        assert_eq!(buffer.len(), 8000);

        let (first_half, second_half) = buffer.split_at(4000);
        let first_peak = peak_frequency(first_half, 8000);
        let second_peak = peak_frequency(second_half, 8000);
        assert!(
            (first_peak - 1000.0).abs() < 10.0,
            "first half peaks at {first_peak} Hz"
        );
        assert!(
            (second_peak - 100.0).abs() < 10.0,
            "second half peaks at {second_peak} Hz"
        );
    }

    #[test]
    fn test_row_position_selects_frequency() {
        // A single bright row in a tall image should place the spectral
        // peak at that row's table frequency.
        let height = 16u32;
        let bright_row = 4usize;
        let mut pixels = vec![0.0f32; 16 * height as usize];
        for x in 0..16 {
            pixels[bright_row * 16 + x] = 1.0;
        }
        let image = GrayscaleImage::new(16, height, pixels).unwrap();
        let params = scenario_params();

        let buffer = engine::synthesize(
            &image,
            &params,
            &EngineTuning::default(),
            |_| {},
            || false,
        )
        .unwrap();

        let expected = freq::compute_row_frequencies(
            height,
            params.min_frequency_hz,
            params.max_frequency_hz,
            params.frequency_scale,
        )[bright_row];
        let measured = peak_frequency(&buffer, params.sample_rate_hz);
        assert!(
            (measured - expected).abs() < 10.0,
            "expected peak near {expected} Hz, measured {measured} Hz"
        );
    }

    #[test]
    fn test_full_generation_pipeline() {
        let image = GrayscaleImage::new(4, 4, vec![0.8; 16]).unwrap();
        let result = generate(
            &image,
            &scenario_params(),
            &EngineTuning::default(),
            |_| {},
            || false,
        )
        .unwrap();

        assert!(!result.wav.wav_data.is_empty());
        assert_eq!(&result.wav.wav_data[0..4], b"RIFF");
        assert_eq!(&result.wav.wav_data[8..12], b"WAVE");
        assert_eq!(result.wav.sample_rate, 8000);
    }

    #[test]
    fn test_generation_determinism() {
        let pixels: Vec<f32> = (0..256).map(|i| (i % 16) as f32 / 15.0).collect();
        let image = GrayscaleImage::new(16, 16, pixels).unwrap();
        let params = scenario_params();

        let result1 = generate(
            &image,
            &params,
            &EngineTuning::default(),
            |_| {},
            || false,
        )
        .unwrap();
        let result2 = generate(
            &image,
            &params,
            &EngineTuning::default(),
            |_| {},
            || false,
        )
        .unwrap();

        assert_eq!(result1.wav.pcm_hash, result2.wav.pcm_hash);
        assert_eq!(result1.wav.wav_data, result2.wav.wav_data);
    }

    #[test]
    fn test_inverted_image_swaps_loud_rows() {
        // With inversion, the dark bottom row becomes the loud one.
        let image = GrayscaleImage::new(1, 2, vec![1.0, 0.0]).unwrap();
        let params = ConversionParams {
            invert_image: true,
            ..scenario_params()
        };
        let buffer = engine::synthesize(
            &image,
            &params,
            &EngineTuning::default(),
            |_| {},
            || false,
        )
        .unwrap();
        // Bottom row of a height-2 linear table sits at min_frequency.
        let measured = peak_frequency(&buffer, params.sample_rate_hz);
        assert!(
            (measured - 100.0).abs() < 10.0,
            "inverted image should peak near 100 Hz, measured {measured}"
        );
    }
}
