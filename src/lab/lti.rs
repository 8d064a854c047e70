//! LTI system page: pass a signal through a designed Butterworth filter
//! (zero-phase) and compare input and output spectra.

use crate::error::Result;
use crate::filter::FilterSpec;
use crate::spectrum::{magnitude_spectrum, Spectrum};

#[derive(Debug, Clone)]
pub struct LtiOutput {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
    pub input_spectrum: Spectrum,
    pub output_spectrum: Spectrum,
}

/// Filter any sampled signal (synthesized tone-plus-noise or a decoded
/// audio clip) through the given design, zero-phase.
pub fn run(x: &[f64], spec: &FilterSpec) -> Result<LtiOutput> {
    let sos = spec.design()?;
    let output = sos.filtfilt(x)?;
    let fs = spec.sample_rate_hz;

    Ok(LtiOutput {
        input_spectrum: magnitude_spectrum(x, fs)?,
        output_spectrum: magnitude_spectrum(&output, fs)?,
        input: x.to_vec(),
        output,
    })
}
