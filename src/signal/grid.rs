#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A uniform time grid: `len` sample instants starting at `start`, spaced
/// `step` seconds apart.
///
/// Storing (start, step, len) instead of a `Vec<f64>` makes the two grid
/// invariants structural: the sample count always matches the grid length,
/// and the spacing is constant by construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start: f64,
    step: f64,
    len: usize,
}

impl TimeGrid {
    /// Grid of `len` points from `start` to `end` inclusive.
    ///
    /// Matches NumPy's `linspace`: the last sample lands exactly on `end`,
    /// so the spacing is `(end - start) / (len - 1)`.
    pub fn linspace(start: f64, end: f64, len: usize) -> Self {
        let step = if len > 1 {
            (end - start) / (len - 1) as f64
        } else {
            0.0
        };
        Self { start, step, len }
    }

    /// Grid of `len` points from `start`, spaced `1 / sample_rate` apart.
    ///
    /// The endpoint is exclusive (`np.linspace(..., endpoint=False)` /
    /// `np.arange(n) / fs`), which keeps the effective rate exact. Prefer
    /// this for anything feeding the spectral analyzer.
    pub fn from_rate(start: f64, sample_rate: f64, len: usize) -> Self {
        Self {
            start,
            step: 1.0 / sample_rate,
            len,
        }
    }

    /// Grid of `len` points symmetric about t = 0, spanning ±`half_span`.
    ///
    /// The even/odd decomposition only reads as time-reversal symmetry on a
    /// grid like this one.
    pub fn symmetric(half_span: f64, len: usize) -> Self {
        Self::linspace(-half_span, half_span, len)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time of sample `i` in seconds.
    #[inline]
    pub fn at(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }

    /// Spacing between adjacent samples in seconds.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Effective sample rate in Hz.
    ///
    /// A grid needs at least two points to have a spacing; grids with a
    /// zero step report a rate of 0 rather than dividing by it.
    pub fn sample_rate(&self) -> f64 {
        if self.step == 0.0 {
            0.0
        } else {
            1.0 / self.step
        }
    }

    /// Total spanned duration in seconds.
    pub fn duration(&self) -> f64 {
        self.step * self.len.saturating_sub(1) as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.at(i))
    }

    /// Materialize the grid for plotting.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}
