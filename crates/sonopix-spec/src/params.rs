//! Conversion parameters for image-to-audio synthesis.
//!
//! Parameters arrive from untrusted callers (CLI flags, JSON requests), so
//! every job runs them through [`ConversionParams::sanitize`] first. After
//! sanitization the synthesis core may assume internally consistent values:
//! ranges hold, the sample rate is one of the supported set, and
//! `min_frequency_hz < max_frequency_hz`.

use serde::{Deserialize, Serialize};

/// Supported output sample rates in Hz.
pub const SUPPORTED_SAMPLE_RATES: [u32; 3] = [22050, 44100, 48000];

/// Duration bounds in seconds.
pub const DURATION_RANGE: (f32, f32) = (1.0, 60.0);

/// Minimum-frequency bounds in Hz.
pub const MIN_FREQUENCY_RANGE: (f32, f32) = (20.0, 2000.0);

/// Maximum-frequency bounds in Hz.
pub const MAX_FREQUENCY_RANGE: (f32, f32) = (500.0, 22000.0);

/// How image rows are spread across the frequency axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyScale {
    /// Equal Hz spacing between adjacent rows.
    Linear,
    /// Equal pitch-interval spacing between adjacent rows (perceptually even).
    Logarithmic,
}

/// Response curve applied to pixel brightness before synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrightnessCurve {
    /// Amplitude equals brightness.
    Linear,
    /// Quadratic response; increases contrast.
    Exponential,
    /// Compresses highlights and lifts shadows.
    Logarithmic,
}

impl BrightnessCurve {
    /// Parses a wire-level curve name, falling back to `Linear` for
    /// anything unrecognized. Unknown curves are never fatal.
    pub fn from_name(name: &str) -> Self {
        match name {
            "exponential" => Self::Exponential,
            "logarithmic" => Self::Logarithmic,
            _ => Self::Linear,
        }
    }
}

/// Immutable per-job conversion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    /// Output duration in seconds (1-60).
    pub duration_seconds: f32,
    /// Frequency assigned to the bottom image row, in Hz (20-2000).
    pub min_frequency_hz: f32,
    /// Frequency assigned to the top image row, in Hz (500-22000).
    pub max_frequency_hz: f32,
    /// Row-to-frequency spacing.
    pub frequency_scale: FrequencyScale,
    /// Output sample rate in Hz (22050, 44100, or 48000).
    pub sample_rate_hz: u32,
    /// Brightness-to-amplitude response curve.
    pub brightness_curve: BrightnessCurve,
    /// Treat dark pixels as loud and bright pixels as quiet.
    pub invert_image: bool,
    /// Inter-column amplitude smoothing, as a fraction in [0,1].
    pub smoothing: f32,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            duration_seconds: 5.0,
            min_frequency_hz: 100.0,
            max_frequency_hz: 8000.0,
            frequency_scale: FrequencyScale::Logarithmic,
            sample_rate_hz: 44100,
            brightness_curve: BrightnessCurve::Linear,
            invert_image: false,
            smoothing: 0.0,
        }
    }
}

impl ConversionParams {
    /// Clamps every field into its legal range and repairs inconsistent
    /// combinations, returning a set of params the synthesis core can
    /// accept without further validation.
    ///
    /// Out-of-range values are not errors at this layer: they are pulled to
    /// the nearest bound. A non-finite or inverted frequency pair is reset
    /// to the defaults, and the sample rate snaps to the nearest supported
    /// rate.
    pub fn sanitize(&self) -> Self {
        let defaults = Self::default();

        let duration_seconds = clamp_finite(
            self.duration_seconds,
            DURATION_RANGE.0,
            DURATION_RANGE.1,
            defaults.duration_seconds,
        );
        let mut min_frequency_hz = clamp_finite(
            self.min_frequency_hz,
            MIN_FREQUENCY_RANGE.0,
            MIN_FREQUENCY_RANGE.1,
            defaults.min_frequency_hz,
        );
        let mut max_frequency_hz = clamp_finite(
            self.max_frequency_hz,
            MAX_FREQUENCY_RANGE.0,
            MAX_FREQUENCY_RANGE.1,
            defaults.max_frequency_hz,
        );
        if min_frequency_hz >= max_frequency_hz {
            min_frequency_hz = defaults.min_frequency_hz;
            max_frequency_hz = defaults.max_frequency_hz;
        }

        let sample_rate_hz = SUPPORTED_SAMPLE_RATES
            .iter()
            .copied()
            .min_by_key(|rate| rate.abs_diff(self.sample_rate_hz))
            .unwrap_or(defaults.sample_rate_hz);

        let smoothing = clamp_finite(self.smoothing, 0.0, 1.0, defaults.smoothing);

        Self {
            duration_seconds,
            min_frequency_hz,
            max_frequency_hz,
            frequency_scale: self.frequency_scale,
            sample_rate_hz,
            brightness_curve: self.brightness_curve,
            invert_image: self.invert_image,
            smoothing,
        }
    }

    /// Number of mono output samples a job with these params produces.
    pub fn total_samples(&self) -> usize {
        (self.sample_rate_hz as f64 * self.duration_seconds as f64).floor() as usize
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
