//! Pure signal-processing primitives used by the lab pipelines.
//!
//! Every function here is stateless: arrays and scalar parameters in,
//! arrays out. Nothing retains state between interactions, so a page can
//! recompute its whole pipeline from scratch on every keypress.

/// Pointwise arithmetic between two signals.
pub mod combine;
/// Normalized auto/cross-correlation across all lags.
pub mod correlate;
/// Even/odd (symmetric/antisymmetric) decomposition.
pub mod decompose;
/// Uniform time grids.
pub mod grid;
/// Naive decimate-and-interpolate resampling (aliasing demo).
pub mod resample;
/// Waveform and noise synthesis.
pub mod synth;

pub use grid::TimeGrid;
pub use synth::Waveform;
