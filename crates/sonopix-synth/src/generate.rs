//! Main entry point for image-to-audio generation.
//!
//! Runs the full pipeline: validate the grayscale buffer, synthesize the
//! mono PCM, normalize it in place, and encode the stereo WAV container.
//! Progress is reported on a single 0-100 scale with 0-90 reserved for the
//! synthesis loop and 90-100 for encoding, which is cheap by comparison
//! but not instantaneous for long durations.

use sonopix_spec::{ConversionParams, GrayscaleImage};

use crate::engine::{synthesize, EngineTuning};
use crate::error::{SynthError, SynthResult};
use crate::normalize::normalize;
use crate::subsample::compute_steps;
use crate::wav::WavResult;

/// Fraction of the progress range reserved for the synthesis loop.
const SYNTHESIS_PROGRESS_SHARE: f32 = 0.9;

/// Result of a full generation run.
#[derive(Debug)]
pub struct GenerateResult {
    /// Encoded WAV container.
    pub wav: WavResult,
    /// Width actually synthesized, after subsampling.
    pub effective_width: u32,
    /// Height actually synthesized, after subsampling.
    pub effective_height: u32,
}

/// Generates a WAV file from a grayscale image.
///
/// `params` must already be sanitized; the image is validated here.
/// `progress` receives values in [0,100], monotonically non-decreasing.
/// `cancel` is polled once per synthesized column and once more before
/// encoding; a cancelled call returns [`SynthError::Cancelled`] and no
/// partial result.
pub fn generate<P, C>(
    image: &GrayscaleImage,
    params: &ConversionParams,
    tuning: &EngineTuning,
    mut progress: P,
    cancel: C,
) -> SynthResult<GenerateResult>
where
    P: FnMut(f32),
    C: Fn() -> bool,
{
    let mut buffer = synthesize(
        image,
        params,
        tuning,
        |p| progress(p * SYNTHESIS_PROGRESS_SHARE),
        &cancel,
    )?;

    normalize(&mut buffer);

    if cancel() {
        return Err(SynthError::Cancelled);
    }

    let wav = WavResult::from_mono(&buffer, params.sample_rate_hz);
    progress(100.0);

    let steps = compute_steps(image.width, image.height, tuning.max_pixels);
    Ok(GenerateResult {
        wav,
        effective_width: steps.effective_width(image.width),
        effective_height: steps.effective_height(image.height),
    })
}
