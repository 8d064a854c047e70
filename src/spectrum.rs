//! DFT-based spectral analysis.
//!
//! Both views share one forward transform of the real input; only the
//! non-negative frequencies survive (the conjugate-symmetric half of a real
//! signal's spectrum carries no extra information). No inverse transform
//! exists anywhere in the lab.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{LabError, Result};

/// One-sided spectrum: (frequency, value) pairs for bins 0..=N/2.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub freqs: Vec<f64>,
    pub values: Vec<f64>,
}

impl Spectrum {
    /// (frequency, value) pairs ready for charting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.freqs
            .iter()
            .zip(self.values.iter())
            .map(|(&f, &v)| (f, v))
            .collect()
    }

    /// Frequency and value of the largest bin.
    pub fn peak(&self) -> (f64, f64) {
        let mut best = (0.0, f64::MIN);
        for (&f, &v) in self.freqs.iter().zip(self.values.iter()) {
            if v > best.1 {
                best = (f, v);
            }
        }
        best
    }

    /// Spacing between adjacent frequency bins in Hz.
    pub fn bin_width(&self) -> f64 {
        if self.freqs.len() > 1 {
            self.freqs[1] - self.freqs[0]
        } else {
            0.0
        }
    }
}

/// Single-sided amplitude spectrum.
///
/// Interior bins are scaled by 2/N so a unit-amplitude tone reads as
/// amplitude ~1 at its bin; DC and (for even N) Nyquist have no mirror bin
/// and get 1/N.
pub fn magnitude_spectrum(x: &[f64], sample_rate: f64) -> Result<Spectrum> {
    let n = x.len();
    let bins = forward(x)?;
    let half = n / 2;
    let nyquist_bin = if n % 2 == 0 { Some(half) } else { None };

    let mut freqs = Vec::with_capacity(half + 1);
    let mut values = Vec::with_capacity(half + 1);
    for (k, bin) in bins.iter().take(half + 1).enumerate() {
        let scale = if k == 0 || Some(k) == nyquist_bin {
            1.0 / n as f64
        } else {
            2.0 / n as f64
        };
        freqs.push(k as f64 * sample_rate / n as f64);
        values.push(scale * bin.norm());
    }

    Ok(Spectrum { freqs, values })
}

/// Energy spectral density: |X[k]|² / N over the non-negative bins.
pub fn energy_spectral_density(x: &[f64], sample_rate: f64) -> Result<Spectrum> {
    let n = x.len();
    let bins = forward(x)?;
    let half = n / 2;

    let mut freqs = Vec::with_capacity(half + 1);
    let mut values = Vec::with_capacity(half + 1);
    for (k, bin) in bins.iter().take(half + 1).enumerate() {
        freqs.push(k as f64 * sample_rate / n as f64);
        values.push(bin.norm_sqr() / n as f64);
    }

    Ok(Spectrum { freqs, values })
}

/// Frequency of the strongest non-DC component.
///
/// The sampling page uses this to propose default under/critical/over
/// rates for whatever signal the user loaded.
pub fn peak_frequency(x: &[f64], sample_rate: f64) -> Result<f64> {
    let spectrum = magnitude_spectrum(x, sample_rate)?;
    let peak = spectrum
        .freqs
        .iter()
        .zip(spectrum.values.iter())
        .skip(1) // ignore DC
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(&f, _)| f)
        .unwrap_or(0.0);
    Ok(peak)
}

fn forward(x: &[f64]) -> Result<Vec<Complex<f64>>> {
    if x.is_empty() {
        return Err(LabError::EmptySignal);
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(x.len());
    let mut buffer: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buffer);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::grid::TimeGrid;
    use crate::signal::synth::{synthesize, WaveParams, Waveform};

    #[test]
    fn pure_tone_peaks_at_its_frequency() {
        let fs = 1000.0;
        let grid = TimeGrid::from_rate(0.0, fs, 1000);
        let x = synthesize(&WaveParams::new(1.0, 50.0, 0.0, Waveform::Sine), &grid);

        let spectrum = magnitude_spectrum(&x, fs).unwrap();
        let (peak_freq, peak_mag) = spectrum.peak();

        assert!(
            (peak_freq - 50.0).abs() <= spectrum.bin_width(),
            "peak at {peak_freq} Hz, expected 50 Hz ± {} Hz",
            spectrum.bin_width()
        );
        // 1000 samples at fs 1000 puts 50 Hz exactly on a bin
        assert!((peak_mag - 1.0).abs() < 1e-6, "tone amplitude should read ~1, got {peak_mag}");
    }

    #[test]
    fn spectrum_has_floor_n_over_2_plus_one_bins() {
        let x = vec![0.5; 64];
        let s = magnitude_spectrum(&x, 64.0).unwrap();
        assert_eq!(s.freqs.len(), 33);
        assert_eq!(s.freqs[0], 0.0);
        assert_eq!(*s.freqs.last().unwrap(), 32.0);

        let odd = magnitude_spectrum(&x[..63], 63.0).unwrap();
        assert_eq!(odd.freqs.len(), 32);
    }

    #[test]
    fn dc_signal_reads_its_level_at_bin_zero() {
        let x = vec![2.0; 128];
        let s = magnitude_spectrum(&x, 100.0).unwrap();
        assert!((s.values[0] - 2.0).abs() < 1e-9);
        assert!(s.values[1..].iter().all(|&v| v < 1e-9));
    }

    #[test]
    fn esd_peak_matches_tone_frequency() {
        let fs = 1000.0;
        let grid = TimeGrid::from_rate(0.0, fs, 1000);
        let x = synthesize(&WaveParams::new(1.0, 5.0, 0.0, Waveform::Sine), &grid);

        let esd = energy_spectral_density(&x, fs).unwrap();
        let (peak_freq, _) = esd.peak();
        assert!((peak_freq - 5.0).abs() <= esd.bin_width());
    }

    #[test]
    fn peak_frequency_ignores_dc() {
        let fs = 200.0;
        let grid = TimeGrid::from_rate(0.0, fs, 400);
        let tone = synthesize(&WaveParams::new(0.3, 20.0, 0.0, Waveform::Sine), &grid);
        // Large DC offset must not win
        let x: Vec<f64> = tone.iter().map(|&v| v + 5.0).collect();

        let f = peak_frequency(&x, fs).unwrap();
        assert!((f - 20.0).abs() <= fs / 400.0 + 1e-9, "got {f}");
    }
}
