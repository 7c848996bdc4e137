//! Row-to-frequency mapping.
//!
//! Each (possibly subsampled) image row is assigned a center frequency so
//! that the top of the image lands at the top of the spectrogram: row 0
//! gets the maximum frequency, the last row the minimum.

use sonopix_spec::FrequencyScale;

/// Computes the per-row center-frequency table.
///
/// Pure function of its inputs. Row 0 maps to `max_freq`, the last row to
/// `min_freq`. A non-positive height yields an empty table, which callers
/// treat as a no-op rather than an error. A single row collapses to the
/// midpoint of the range: the geometric mean under a logarithmic scale,
/// the arithmetic mean under a linear one.
pub fn compute_row_frequencies(
    height: u32,
    min_freq: f32,
    max_freq: f32,
    scale: FrequencyScale,
) -> Vec<f32> {
    if height == 0 {
        return Vec::new();
    }
    if height == 1 {
        return vec![match scale {
            FrequencyScale::Logarithmic => (min_freq * max_freq).sqrt(),
            FrequencyScale::Linear => (min_freq + max_freq) / 2.0,
        }];
    }

    let span = (height - 1) as f32;
    (0..height)
        .map(|y| {
            let t = y as f32 / span;
            match scale {
                FrequencyScale::Logarithmic => min_freq * (max_freq / min_freq).powf(1.0 - t),
                FrequencyScale::Linear => max_freq - t * (max_freq - min_freq),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-3;

    #[test]
    fn test_zero_height_is_empty() {
        assert!(compute_row_frequencies(0, 100.0, 1000.0, FrequencyScale::Linear).is_empty());
    }

    #[test]
    fn test_single_row_linear_is_arithmetic_mean() {
        let table = compute_row_frequencies(1, 100.0, 1000.0, FrequencyScale::Linear);
        assert_eq!(table, vec![550.0]);
    }

    #[test]
    fn test_single_row_log_is_geometric_mean() {
        let table = compute_row_frequencies(1, 100.0, 1000.0, FrequencyScale::Logarithmic);
        assert!((table[0] - 316.2278).abs() < TOLERANCE);
    }

    #[test]
    fn test_endpoints_linear() {
        let table = compute_row_frequencies(64, 100.0, 1000.0, FrequencyScale::Linear);
        assert!((table[0] - 1000.0).abs() < TOLERANCE);
        assert!((table[63] - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_endpoints_logarithmic() {
        let table = compute_row_frequencies(64, 100.0, 1000.0, FrequencyScale::Logarithmic);
        assert!((table[0] - 1000.0).abs() < TOLERANCE);
        assert!((table[63] - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_monotonically_non_increasing() {
        for scale in [FrequencyScale::Linear, FrequencyScale::Logarithmic] {
            let table = compute_row_frequencies(257, 20.0, 20000.0, scale);
            for pair in table.windows(2) {
                assert!(pair[0] >= pair[1], "rows must descend in frequency");
            }
        }
    }

    #[test]
    fn test_log_midpoint_is_octave_centered() {
        // With a 2-octave range, the middle row of 3 sits exactly one
        // octave above the minimum.
        let table = compute_row_frequencies(3, 100.0, 400.0, FrequencyScale::Logarithmic);
        assert!((table[1] - 200.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_linear_spacing_is_even() {
        let table = compute_row_frequencies(4, 100.0, 400.0, FrequencyScale::Linear);
        assert!((table[0] - table[1] - 100.0).abs() < TOLERANCE);
        assert!((table[1] - table[2] - 100.0).abs() < TOLERANCE);
    }
}
