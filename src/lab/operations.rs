//! Signal operations page: two synthesized signals, a pointwise operation,
//! and the amplitude spectra of all three.

use crate::error::Result;
use crate::signal::combine::{combine, SignalOp};
use crate::signal::grid::TimeGrid;
use crate::signal::synth::{synthesize, WaveParams, Waveform};
use crate::spectrum::{magnitude_spectrum, Spectrum};

const NUM_POINTS: usize = 1000;

#[derive(Debug, Clone, Copy)]
pub struct OperationsParams {
    pub first: WaveParams,
    pub second: WaveParams,
    pub duration_secs: f64,
    pub op: SignalOp,
}

impl Default for OperationsParams {
    fn default() -> Self {
        Self {
            first: WaveParams::new(5.0, 5.0, 0.0, Waveform::Sine),
            second: WaveParams::new(5.0, 10.0, 0.0, Waveform::Cosine),
            duration_secs: 1.0,
            op: SignalOp::Add,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OperationsOutput {
    pub time: Vec<f64>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    pub combined: Vec<f64>,
    pub first_spectrum: Spectrum,
    pub second_spectrum: Spectrum,
    pub combined_spectrum: Spectrum,
}

pub fn run(params: &OperationsParams) -> Result<OperationsOutput> {
    let grid = TimeGrid::linspace(0.0, params.duration_secs, NUM_POINTS);
    let fs = grid.sample_rate();

    let first = synthesize(&params.first, &grid);
    let second = synthesize(&params.second, &grid);
    let combined = combine(&first, &second, params.op)?;

    Ok(OperationsOutput {
        time: grid.to_vec(),
        first_spectrum: magnitude_spectrum(&first, fs)?,
        second_spectrum: magnitude_spectrum(&second, fs)?,
        combined_spectrum: magnitude_spectrum(&combined, fs)?,
        first,
        second,
        combined,
    })
}
