//! Sampling-theorem page: estimate the signal's maximum frequency, then
//! reconstruct it at under, critical, and over sampling rates with the
//! naive resampler so aliasing is visible.

use crate::error::Result;
use crate::signal::correlate::pearson;
use crate::signal::resample::{naive_resample, SamplingRates};
use crate::spectrum::peak_frequency;

/// One reconstruction at a chosen rate, with its fidelity score.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub rate_hz: f64,
    pub samples: Vec<f64>,
    /// Pearson correlation against the original signal.
    pub fidelity: f64,
}

#[derive(Debug, Clone)]
pub struct SamplingOutput {
    pub max_frequency_hz: f64,
    pub rates: SamplingRates,
    pub under: Reconstruction,
    pub critical: Reconstruction,
    pub over: Reconstruction,
}

/// Run the page pipeline over any sampled signal (synthesized tone or a
/// decoded audio clip).
pub fn run(x: &[f64], sample_rate_hz: f64) -> Result<SamplingOutput> {
    let max_frequency_hz = peak_frequency(x, sample_rate_hz)?;
    let rates = SamplingRates::from_max_frequency(max_frequency_hz);

    Ok(SamplingOutput {
        max_frequency_hz,
        under: reconstruct(x, sample_rate_hz, rates.under_hz)?,
        critical: reconstruct(x, sample_rate_hz, rates.critical_hz)?,
        over: reconstruct(x, sample_rate_hz, rates.over_hz)?,
        rates,
    })
}

/// Reconstruct at one specific rate (the page also lets the user type a
/// rate directly).
pub fn reconstruct(x: &[f64], fs_orig: f64, rate_hz: f64) -> Result<Reconstruction> {
    let samples = naive_resample(x, fs_orig, rate_hz)?;
    // Critical sampling can collapse a tone onto its zero crossings; a
    // constant reconstruction has no defined correlation, so score it 0
    let fidelity = match pearson(x, &samples) {
        Ok(r) => r,
        Err(crate::error::LabError::DegenerateSignal) => 0.0,
        Err(e) => return Err(e),
    };
    Ok(Reconstruction {
        rate_hz,
        samples,
        fidelity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::grid::TimeGrid;
    use crate::signal::synth::{synthesize, WaveParams, Waveform};

    #[test]
    fn tone_pipeline_ranks_rates_by_fidelity() {
        let fs = 2000.0;
        let grid = TimeGrid::from_rate(0.0, fs, 2000);
        let x = synthesize(&WaveParams::new(1.0, 50.0, 0.0, Waveform::Sine), &grid);

        let out = run(&x, fs).unwrap();
        assert!(
            (out.max_frequency_hz - 50.0).abs() <= 1.0 + 1e-9,
            "estimated f_max = {}",
            out.max_frequency_hz
        );
        assert!((out.rates.critical_hz - 2.0 * out.max_frequency_hz).abs() < 1e-9);

        assert!(out.over.fidelity >= 0.95, "over: {}", out.over.fidelity);
        assert!(
            out.under.fidelity < out.over.fidelity,
            "under ({}) should trail over ({})",
            out.under.fidelity,
            out.over.fidelity
        );
    }

    #[test]
    fn reconstructions_keep_the_original_length() {
        let fs = 1000.0;
        let grid = TimeGrid::from_rate(0.0, fs, 512);
        let x = synthesize(&WaveParams::new(1.0, 20.0, 0.0, Waveform::Sine), &grid);

        let out = run(&x, fs).unwrap();
        for rec in [&out.under, &out.critical, &out.over] {
            assert_eq!(rec.samples.len(), x.len());
        }
    }
}
