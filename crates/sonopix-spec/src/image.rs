//! Grayscale input buffer and collaborator-side conversion helpers.
//!
//! The synthesis core consumes a [`GrayscaleImage`] as an opaque,
//! already-validated buffer. Converting color data to luminance is the
//! caller's job; the constructors here exist for collaborators (the CLI,
//! tests) and are never invoked by the engine itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rec. 709 luminance weights used for RGB-to-grayscale conversion.
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Errors raised by grayscale buffer validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    /// A dimension is zero.
    #[error("image dimensions must be positive, got {width}x{height}")]
    EmptyDimensions {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },

    /// Pixel count does not match the dimensions.
    #[error("pixel buffer length {actual} does not match {width}x{height} = {expected}")]
    LengthMismatch {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Expected pixel count (`width * height`).
        expected: usize,
        /// Actual pixel count.
        actual: usize,
    },
}

/// A row-major grayscale raster with brightness values in [0,1].
///
/// Row 0 is the top of the image. The buffer is read-only to the synthesis
/// core for the lifetime of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrayscaleImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major brightness values of length `width * height`.
    pub pixels: Vec<f32>,
}

impl GrayscaleImage {
    /// Wraps an existing buffer, validating the length invariant.
    pub fn new(width: u32, height: u32, pixels: Vec<f32>) -> Result<Self, ImageError> {
        let image = Self {
            width,
            height,
            pixels,
        };
        image.validate()?;
        Ok(image)
    }

    /// Checks the dimension and length invariants.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::EmptyDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(ImageError::LengthMismatch {
                width: self.width,
                height: self.height,
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Converts packed 8-bit RGB data (3 bytes per pixel, row-major) to
    /// grayscale using luminance weighting.
    pub fn from_rgb8(width: u32, height: u32, rgb: &[u8]) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize;
        if rgb.len() != expected * 3 {
            return Err(ImageError::LengthMismatch {
                width,
                height,
                expected: expected * 3,
                actual: rgb.len(),
            });
        }
        let pixels = rgb.chunks_exact(3).map(luma).collect();
        Self::new(width, height, pixels)
    }

    /// Converts packed 8-bit RGBA data (4 bytes per pixel, row-major) to
    /// grayscale using luminance weighting. Alpha is ignored.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize;
        if rgba.len() != expected * 4 {
            return Err(ImageError::LengthMismatch {
                width,
                height,
                expected: expected * 4,
                actual: rgba.len(),
            });
        }
        let pixels = rgba.chunks_exact(4).map(luma).collect();
        Self::new(width, height, pixels)
    }

    /// Brightness at `(x, y)` without bounds checks beyond debug assertions.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> f32 {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

#[inline]
fn luma(px: &[u8]) -> f32 {
    (LUMA_WEIGHTS[0] * px[0] as f32
        + LUMA_WEIGHTS[1] * px[1] as f32
        + LUMA_WEIGHTS[2] * px[2] as f32)
        / 255.0
}
