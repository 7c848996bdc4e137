//! Additive-synthesis engine.
//!
//! Maps image rows to sine oscillators and image columns to time: for every
//! output sample the engine sums one sinusoid per row, weighted by the
//! brightness of that row's pixel in the current column. Oscillator phase
//! persists across columns so a partial that fades out and back in stays
//! continuous.
//!
//! The per-column loop is the cancellation and progress granularity: a
//! cancel request takes effect within one column's worth of work, and the
//! hot per-sample loop carries no cancellation overhead at all.

use std::f32::consts::TAU;

use sonopix_spec::{ConversionParams, GrayscaleImage};

use crate::brightness::map_amplitude;
use crate::error::{SynthError, SynthResult};
use crate::freq::compute_row_frequencies;
use crate::smoothing::TemporalSmoother;
use crate::subsample::{compute_steps, DEFAULT_MAX_PIXELS};

/// How often (in columns) the engine reports progress.
const PROGRESS_INTERVAL_COLUMNS: u32 = 10;

/// Tuning constants that trade fidelity for speed.
///
/// Both values come from the reference tuning and may need recalibration
/// per platform; neither is a correctness invariant.
#[derive(Debug, Clone, Copy)]
pub struct EngineTuning {
    /// Rows whose amplitude is below this skip the sine evaluation for the
    /// current sample (their phase still advances).
    pub min_amplitude: f32,
    /// Pixel budget above which the input is decimated.
    pub max_pixels: u64,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            min_amplitude: 0.001,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Per-row phase accumulators for one synthesis call.
///
/// Owned exclusively by the call that created it; nothing here is shared
/// across jobs, which keeps the engine re-entrant for concurrent jobs on
/// separate threads.
#[derive(Debug)]
struct OscillatorBank {
    phase_increment: Vec<f32>,
    phase: Vec<f32>,
}

impl OscillatorBank {
    fn new(frequencies: &[f32], sample_rate: u32) -> Self {
        let phase_increment = frequencies
            .iter()
            .map(|f| TAU * f / sample_rate as f32)
            .collect();
        Self {
            phase_increment,
            phase: vec![0.0; frequencies.len()],
        }
    }
}

/// Synthesizes the raw (unnormalized) mono PCM buffer for one image.
///
/// `progress` receives the engine's own completion percentage in [0,100];
/// the caller rescales it into whatever range it has reserved for the
/// synthesis phase. `cancel` is polled once per column; when it returns
/// true the call fails with [`SynthError::Cancelled`] and no partial
/// buffer escapes.
///
/// Fails with [`SynthError::InvalidInput`] when the image buffer violates
/// its dimension or length invariants. Params are assumed sanitized.
pub fn synthesize<P, C>(
    image: &GrayscaleImage,
    params: &ConversionParams,
    tuning: &EngineTuning,
    mut progress: P,
    cancel: C,
) -> SynthResult<Vec<f32>>
where
    P: FnMut(f32),
    C: Fn() -> bool,
{
    image.validate()?;

    let steps = compute_steps(image.width, image.height, tuning.max_pixels);
    let effective_width = steps.effective_width(image.width);
    let effective_height = steps.effective_height(image.height);

    let frequencies = compute_row_frequencies(
        effective_height,
        params.min_frequency_hz,
        params.max_frequency_hz,
        params.frequency_scale,
    );
    let mut bank = OscillatorBank::new(&frequencies, params.sample_rate_hz);

    let total_samples = params.total_samples();
    let mut buffer = vec![0.0f32; total_samples];

    // Real-valued column width; flooring the boundaries makes the integer
    // per-column counts sum exactly to total_samples.
    let samples_per_column = total_samples as f64 / effective_width as f64;

    let mut smoother = TemporalSmoother::new(effective_height as usize, params.smoothing);
    let mut amplitudes = vec![0.0f32; effective_height as usize];

    for x in 0..effective_width {
        if cancel() {
            return Err(SynthError::Cancelled);
        }
        if x % PROGRESS_INTERVAL_COLUMNS == 0 {
            progress(x as f32 / effective_width as f32 * 100.0);
        }

        let src_x = (x * steps.step_x).min(image.width - 1);
        for (y, amp) in amplitudes.iter_mut().enumerate() {
            let src_y = (y as u32 * steps.step_y).min(image.height - 1);
            *amp = map_amplitude(
                image.pixel(src_x, src_y),
                params.brightness_curve,
                params.invert_image,
            );
        }
        smoother.apply(&mut amplitudes);

        let start = (x as f64 * samples_per_column).floor() as usize;
        let end = ((x + 1) as f64 * samples_per_column).floor() as usize;

        for sample in &mut buffer[start..end] {
            let mut acc = 0.0f32;
            for (y, &amp) in amplitudes.iter().enumerate() {
                if amp > tuning.min_amplitude {
                    acc += amp * bank.phase[y].sin();
                }
                // Phase advances even for skipped rows so a partial stays
                // continuous when its amplitude rises again.
                bank.phase[y] += bank.phase_increment[y];
                if bank.phase[y] > TAU {
                    // Subtract rather than modulo: fmod would reintroduce
                    // the floating error the wrap exists to avoid.
                    bank.phase[y] -= TAU;
                }
            }
            *sample = acc;
        }
    }

    progress(100.0);
    Ok(buffer)
}
