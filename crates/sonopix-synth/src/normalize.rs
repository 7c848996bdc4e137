//! Output level normalization.

/// Peak level the buffer is scaled to when normalization applies.
const TARGET_PEAK: f32 = 0.9;

/// Peak above which the signal would clip after encoding headroom.
const CLIP_THRESHOLD: f32 = 0.9;

/// Peak below which the signal is considered too quiet to be useful.
const QUIET_THRESHOLD: f32 = 0.1;

/// Rescales the PCM buffer in place to a safe peak level.
///
/// Signals that would clip (peak > 0.9) or are near-silent (peak < 0.1)
/// are scaled to a 0.9 peak; anything already in between is left alone, so
/// reasonable signals don't pick up needless gain changes. A fully silent
/// buffer stays silent.
pub fn normalize(buffer: &mut [f32]) {
    let peak = buffer.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    if peak == 0.0 {
        return;
    }
    if peak > CLIP_THRESHOLD || peak < QUIET_THRESHOLD {
        let gain = TARGET_PEAK / peak;
        for sample in buffer.iter_mut() {
            *sample *= gain;
        }
    }
}
