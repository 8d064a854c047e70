use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::signal::grid::TimeGrid;

/*
Waveform Synthesis
==================

The synthesizer turns (amplitude, frequency, phase, kind) into a sampled
signal over a time grid. These are the three classroom waveforms:

  Sine:    A·sin(2πft + φ)     pure tone, single spectral line
  Cosine:  A·cos(2πft + φ)     same line, 90° phase lead
  Square:  A·sign(sin(2πft+φ)) odd harmonics at 1/n amplitude

sign(0) policy: we follow the NumPy convention sign(0) = 0, so a square
wave sampled exactly on a zero crossing yields 0 rather than ±A. The choice
only matters when the grid lands exactly on a crossing (e.g. t = 0, φ = 0).

A frequency of 0 Hz degenerates to a DC signal: sin(φ) or cos(φ) scaled by
the amplitude, or sign(sin(φ)) for the square.
*/

/// Closed set of waveform kinds.
///
/// Replaces the original lab's string-keyed branches (`"Sin"`, `"Cos"`,
/// `"Square"`) with enum dispatch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Cosine,
    Square,
}

impl Waveform {
    pub const ALL: [Waveform; 3] = [Waveform::Sine, Waveform::Cosine, Waveform::Square];

    pub fn label(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Cosine => "Cosine",
            Waveform::Square => "Square",
        }
    }
}

/// Parameters for one synthesized signal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct WaveParams {
    pub amplitude: f64,
    pub frequency_hz: f64,
    /// Phase offset in radians.
    pub phase_rad: f64,
    pub waveform: Waveform,
}

impl WaveParams {
    pub fn new(amplitude: f64, frequency_hz: f64, phase_rad: f64, waveform: Waveform) -> Self {
        Self {
            amplitude,
            frequency_hz,
            phase_rad,
            waveform,
        }
    }
}

/// Sample a waveform over the grid. Output length equals the grid length.
pub fn synthesize(params: &WaveParams, grid: &TimeGrid) -> Vec<f64> {
    let WaveParams {
        amplitude,
        frequency_hz,
        phase_rad,
        waveform,
    } = *params;

    grid.iter()
        .map(|t| {
            let angle = TAU * frequency_hz * t + phase_rad;
            match waveform {
                Waveform::Sine => amplitude * angle.sin(),
                Waveform::Cosine => amplitude * angle.cos(),
                Waveform::Square => amplitude * sign(angle.sin()),
            }
        })
        .collect()
}

/// NumPy-style sign: -1, 0, or +1.
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Seeded uniform white noise in [-amplitude, amplitude].
///
/// A simple 64-bit LCG keeps the lab reproducible between recomputes of the
/// same page; statistical quality is irrelevant here.
pub fn white_noise(len: usize, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| amplitude * (next_unit(&mut state) * 2.0 - 1.0))
        .collect()
}

/// Seeded Gaussian noise with the given standard deviation (mean 0).
///
/// Box-Muller over the same LCG. Used for the "noisy copy" signals on the
/// correlation and QRS pages.
pub fn gaussian_noise(len: usize, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        // Box-Muller needs u1 in (0, 1]
        let u1 = next_unit(&mut state).max(f64::MIN_POSITIVE);
        let u2 = next_unit(&mut state);
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = TAU * u2;
        out.push(std_dev * r * theta.cos());
        if out.len() < len {
            out.push(std_dev * r * theta.sin());
        }
    }
    out
}

#[inline]
fn next_unit(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    // Top 53 bits give a uniform double in [0, 1)
    (*state >> 11) as f64 / (1u64 << 53) as f64
}
