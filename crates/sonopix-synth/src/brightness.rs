//! Pixel brightness to synthesis amplitude mapping.

use sonopix_spec::BrightnessCurve;

/// Maps a normalized brightness value in [0,1] to a synthesis amplitude
/// in [0,1].
///
/// Inversion is applied before the response curve, so `invert` flips which
/// end of the brightness range drives loud partials.
#[inline]
pub fn map_amplitude(value: f32, curve: BrightnessCurve, invert: bool) -> f32 {
    let v = if invert { 1.0 - value } else { value };
    match curve {
        BrightnessCurve::Linear => v,
        BrightnessCurve::Exponential => v * v,
        BrightnessCurve::Logarithmic => (1.0 + 9.0 * v).ln() / 10.0_f32.ln(),
    }
}
