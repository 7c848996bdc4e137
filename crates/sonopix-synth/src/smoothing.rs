//! Inter-column amplitude smoothing.
//!
//! Adjacent time slices with very different amplitude vectors produce
//! audible clicks at the column boundary. The smoother blends each column
//! with the previous one to soften those discontinuities.

/// Blends successive per-column amplitude vectors.
///
/// The history buffer always holds the *pre-blend* amplitudes of the last
/// column, so the unsmoothed signal seeds the next blend. Seeding from the
/// smoothed output instead would compound the blend across columns and
/// smear the whole image.
#[derive(Debug)]
pub struct TemporalSmoother {
    previous: Vec<f32>,
    factor: f32,
    seeded: bool,
}

impl TemporalSmoother {
    /// Creates a smoother for amplitude vectors of `rows` entries.
    ///
    /// `factor` is the blend fraction in [0,1]: 0 disables smoothing
    /// entirely, 1 replaces each column with its predecessor.
    pub fn new(rows: usize, factor: f32) -> Self {
        Self {
            previous: vec![0.0; rows],
            factor,
            seeded: false,
        }
    }

    /// Smooths one column's amplitude vector in place.
    ///
    /// The first column seeds the history and passes through unchanged.
    pub fn apply(&mut self, current: &mut [f32]) {
        debug_assert_eq!(current.len(), self.previous.len());

        if !self.seeded {
            self.previous.copy_from_slice(current);
            self.seeded = true;
            return;
        }
        if self.factor <= 0.0 {
            return;
        }

        for (cur, prev) in current.iter_mut().zip(self.previous.iter_mut()) {
            let raw = *cur;
            *cur = raw * (1.0 - self.factor) + *prev * self.factor;
            *prev = raw;
        }
    }
}
