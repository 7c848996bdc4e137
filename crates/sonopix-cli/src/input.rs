//! Image loading and grayscale conversion.

use anyhow::{Context, Result};
use sonopix_spec::GrayscaleImage;
use std::path::Path;

/// Loads an image file and converts it to the grayscale buffer the
/// synthesis core consumes.
pub fn load_grayscale(path: &Path) -> Result<GrayscaleImage> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to load image: {}", path.display()))?;
    let rgb = decoded.to_rgb8();
    let grayscale = GrayscaleImage::from_rgb8(rgb.width(), rgb.height(), rgb.as_raw())
        .context("decoded image has inconsistent dimensions")?;
    Ok(grayscale)
}
