//! Sonopix parameter and input model.
//!
//! This crate defines the data contracts shared by the synthesis core and
//! its collaborators:
//!
//! - [`ConversionParams`] - per-job synthesis parameters, with
//!   [`ConversionParams::sanitize`] clamping untrusted input into a state
//!   the core accepts without further validation
//! - [`GrayscaleImage`] - the row-major grayscale buffer the core consumes,
//!   plus luminance conversion helpers for collaborators that start from
//!   color data
//!
//! The synthesis core itself lives in `sonopix-synth`.

pub mod image;
pub mod params;

pub use image::{GrayscaleImage, ImageError};
pub use params::{
    BrightnessCurve, ConversionParams, FrequencyScale, DURATION_RANGE, MAX_FREQUENCY_RANGE,
    MIN_FREQUENCY_RANGE, SUPPORTED_SAMPLE_RATES,
};
