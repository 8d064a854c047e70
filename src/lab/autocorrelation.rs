//! Autocorrelation page: a clean tone and a noisy copy, each with its
//! normalized autocorrelation and energy spectral density.

use crate::error::Result;
use crate::lab::series;
use crate::signal::correlate::{autocorrelation, CorrelationResult};
use crate::signal::grid::TimeGrid;
use crate::signal::synth::{gaussian_noise, synthesize, WaveParams, Waveform};
use crate::spectrum::{energy_spectral_density, Spectrum};

const NUM_POINTS: usize = 1000;
const DURATION_SECS: f64 = 1.0;
const NOISE_STD: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct AutocorrelationParams {
    pub waveform: Waveform,
    pub frequency_hz: f64,
    pub noise_seed: u64,
}

impl Default for AutocorrelationParams {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency_hz: 5.0,
            noise_seed: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutocorrelationOutput {
    pub time: Vec<f64>,
    pub clean: Vec<f64>,
    pub noisy: Vec<f64>,
    pub clean_autocorr: CorrelationResult,
    pub noisy_autocorr: CorrelationResult,
    pub clean_esd: Spectrum,
    pub noisy_esd: Spectrum,
}

impl AutocorrelationOutput {
    pub fn clean_series(&self) -> Vec<(f64, f64)> {
        series(&self.time, &self.clean)
    }

    pub fn noisy_series(&self) -> Vec<(f64, f64)> {
        series(&self.time, &self.noisy)
    }
}

pub fn run(params: &AutocorrelationParams) -> Result<AutocorrelationOutput> {
    let grid = TimeGrid::linspace(0.0, DURATION_SECS, NUM_POINTS);
    let fs = grid.sample_rate();

    let wave = WaveParams::new(1.0, params.frequency_hz, 0.0, params.waveform);
    let clean = synthesize(&wave, &grid);
    let noise = gaussian_noise(clean.len(), NOISE_STD, params.noise_seed);
    let noisy: Vec<f64> = clean.iter().zip(noise.iter()).map(|(&s, &n)| s + n).collect();

    Ok(AutocorrelationOutput {
        time: grid.to_vec(),
        clean_autocorr: autocorrelation(&clean)?,
        noisy_autocorr: autocorrelation(&noisy)?,
        clean_esd: energy_spectral_density(&clean, fs)?,
        noisy_esd: energy_spectral_density(&noisy, fs)?,
        clean,
        noisy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_zero_is_one_for_both_signals() {
        let out = run(&AutocorrelationParams::default()).unwrap();
        assert!((out.clean_autocorr.at_zero() - 1.0).abs() < 1e-9);
        assert!((out.noisy_autocorr.at_zero() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn esd_peak_sits_at_the_tone_frequency() {
        let params = AutocorrelationParams {
            frequency_hz: 5.0,
            ..Default::default()
        };
        let out = run(&params).unwrap();
        let (peak_freq, _) = out.clean_esd.peak();
        assert!(
            (peak_freq - 5.0).abs() <= out.clean_esd.bin_width(),
            "peak at {peak_freq} Hz"
        );
    }

    #[test]
    fn noise_widens_the_correlation_tails() {
        let out = run(&AutocorrelationParams::default()).unwrap();
        // Away from lag 0 the noisy autocorrelation decays faster than the
        // periodic clean one, but both stay bounded by 1
        assert!(out.noisy_autocorr.values.iter().all(|v| v.abs() <= 1.0 + 1e-9));
        assert_eq!(out.clean_autocorr.values.len(), 2 * NUM_POINTS - 1);
    }
}
