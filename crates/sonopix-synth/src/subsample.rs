//! Decimation of oversized inputs.
//!
//! Synthesis cost grows with `width * height * samples_per_column`, so
//! arbitrarily large images are decimated to a bounded pixel budget. The
//! fidelity loss is an accepted tradeoff, not an error.

/// Default pixel budget above which subsampling kicks in (2000 x 2000).
///
/// A tuning constant, not an invariant; see [`crate::engine::EngineTuning`].
pub const DEFAULT_MAX_PIXELS: u64 = 4_000_000;

/// Row/column stride decided for one input image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsampleSteps {
    /// Stride along the x axis (columns).
    pub step_x: u32,
    /// Stride along the y axis (rows).
    pub step_y: u32,
}

impl SubsampleSteps {
    /// Effective width after decimation (`ceil(width / step_x)`).
    pub fn effective_width(&self, width: u32) -> u32 {
        width.div_ceil(self.step_x)
    }

    /// Effective height after decimation (`ceil(height / step_y)`).
    pub fn effective_height(&self, height: u32) -> u32 {
        height.div_ceil(self.step_y)
    }

    /// Whether any decimation happens at all.
    pub fn is_identity(&self) -> bool {
        self.step_x == 1 && self.step_y == 1
    }
}

/// Decides the decimation stride for an image of `width * height` pixels
/// against a pixel budget.
///
/// Images within the budget keep a stride of 1 on both axes. Larger images
/// get a uniform stride of `ceil(sqrt(pixels / budget))`, which brings the
/// effective pixel count back under the budget.
pub fn compute_steps(width: u32, height: u32, max_pixels: u64) -> SubsampleSteps {
    let pixels = width as u64 * height as u64;
    if pixels <= max_pixels || max_pixels == 0 {
        return SubsampleSteps {
            step_x: 1,
            step_y: 1,
        };
    }
    let step = (pixels as f64 / max_pixels as f64).sqrt().ceil() as u32;
    SubsampleSteps {
        step_x: step,
        step_y: step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_image_is_untouched() {
        let steps = compute_steps(640, 480, DEFAULT_MAX_PIXELS);
        assert!(steps.is_identity());
        assert_eq!(steps.effective_width(640), 640);
        assert_eq!(steps.effective_height(480), 480);
    }

    #[test]
    fn test_budget_boundary_is_inclusive() {
        assert!(compute_steps(2000, 2000, DEFAULT_MAX_PIXELS).is_identity());
        assert!(!compute_steps(2001, 2000, DEFAULT_MAX_PIXELS).is_identity());
    }

    #[test]
    fn test_stride_is_uniform() {
        let steps = compute_steps(8000, 2000, DEFAULT_MAX_PIXELS);
        assert_eq!(steps.step_x, steps.step_y);
        assert_eq!(steps.step_x, 2);
    }

    #[test]
    fn test_effective_pixels_fit_budget() {
        for (w, h) in [(4000, 4000), (10000, 3000), (2001, 2001), (50000, 1000)] {
            let steps = compute_steps(w, h, DEFAULT_MAX_PIXELS);
            let effective =
                steps.effective_width(w) as u64 * steps.effective_height(h) as u64;
            assert!(
                effective <= DEFAULT_MAX_PIXELS,
                "{w}x{h} decimated to {effective} pixels"
            );
        }
    }

    #[test]
    fn test_effective_dims_use_ceiling_division() {
        let steps = SubsampleSteps {
            step_x: 3,
            step_y: 3,
        };
        assert_eq!(steps.effective_width(10), 4);
        assert_eq!(steps.effective_height(9), 3);
    }
}
