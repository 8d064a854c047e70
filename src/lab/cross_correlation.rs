//! Cross-correlation page: a tone against its noisy copy.

use crate::error::Result;
use crate::lab::series;
use crate::signal::correlate::{cross_correlation, CorrelationResult};
use crate::signal::grid::TimeGrid;
use crate::signal::synth::{gaussian_noise, synthesize, WaveParams, Waveform};

const NUM_POINTS: usize = 1000;
const DURATION_SECS: f64 = 1.0;
const NOISE_STD: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct CrossCorrelationParams {
    pub waveform: Waveform,
    pub frequency_hz: f64,
    pub noise_seed: u64,
}

impl Default for CrossCorrelationParams {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency_hz: 5.0,
            noise_seed: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrossCorrelationOutput {
    pub time: Vec<f64>,
    pub clean: Vec<f64>,
    pub noisy: Vec<f64>,
    pub correlation: CorrelationResult,
}

impl CrossCorrelationOutput {
    pub fn clean_series(&self) -> Vec<(f64, f64)> {
        series(&self.time, &self.clean)
    }

    pub fn noisy_series(&self) -> Vec<(f64, f64)> {
        series(&self.time, &self.noisy)
    }
}

pub fn run(params: &CrossCorrelationParams) -> Result<CrossCorrelationOutput> {
    let grid = TimeGrid::linspace(0.0, DURATION_SECS, NUM_POINTS);

    let wave = WaveParams::new(1.0, params.frequency_hz, 0.0, params.waveform);
    let clean = synthesize(&wave, &grid);
    let noise = gaussian_noise(clean.len(), NOISE_STD, params.noise_seed);
    let noisy: Vec<f64> = clean.iter().zip(noise.iter()).map(|(&s, &n)| s + n).collect();

    Ok(CrossCorrelationOutput {
        time: grid.to_vec(),
        correlation: cross_correlation(&clean, &noisy)?,
        clean,
        noisy,
    })
}
