//! QRS filtration page: one ECG cycle, an additive-noise copy, an order-4
//! lowpass at 40 Hz applied zero-phase, and the correlation between the
//! original and recovered cycles.

use std::path::Path;

use crate::error::{LabError, Result};
use crate::filter::FilterSpec;
use crate::io::load_ecg_record;
use crate::signal::correlate::pearson;
use crate::signal::grid::TimeGrid;
use crate::signal::synth::gaussian_noise;

/// PhysioNet sample records are digitized at 250 Hz.
pub const ECG_SAMPLE_RATE_HZ: f64 = 250.0;
/// Skip the record lead-in before extracting a cycle.
const CYCLE_START: usize = 500;
/// One second of signal, assumed to cover a full cardiac cycle.
const CYCLE_SECS: f64 = 1.0;
const NOISE_STD: f64 = 0.05;
const CUTOFF_HZ: f64 = 40.0;
const ORDER: usize = 4;

#[derive(Debug, Clone)]
pub struct QrsOutput {
    /// Cycle time axis, 0..1 s.
    pub time: Vec<f64>,
    pub cycle: Vec<f64>,
    pub noisy: Vec<f64>,
    pub filtered: Vec<f64>,
    /// Pearson correlation of the original cycle vs the filtered one.
    pub recovered_correlation: f64,
}

/// Load an ECG record from disk and run the page pipeline.
pub fn run_from_file(path: &Path, noise_seed: u64) -> Result<QrsOutput> {
    let record = load_ecg_record(path)?;
    run(&record, noise_seed)
}

/// Run the pipeline over an already-loaded single-lead record.
pub fn run(record: &[f64], noise_seed: u64) -> Result<QrsOutput> {
    let cycle_len = (ECG_SAMPLE_RATE_HZ * CYCLE_SECS) as usize;
    let needed = CYCLE_START + cycle_len;
    if record.len() < needed {
        return Err(LabError::SignalTooShort {
            len: record.len(),
            needed,
        });
    }

    let cycle = record[CYCLE_START..needed].to_vec();
    let noise = gaussian_noise(cycle.len(), NOISE_STD, noise_seed);
    let noisy: Vec<f64> = cycle.iter().zip(noise.iter()).map(|(&s, &n)| s + n).collect();

    let sos = FilterSpec::lowpass(CUTOFF_HZ, ORDER, ECG_SAMPLE_RATE_HZ).design()?;
    let filtered = sos.filtfilt(&noisy)?;
    let recovered_correlation = pearson(&cycle, &filtered)?;

    let grid = TimeGrid::linspace(0.0, CYCLE_SECS, cycle.len());
    Ok(QrsOutput {
        time: grid.to_vec(),
        cycle,
        noisy,
        filtered,
        recovered_correlation,
    })
}
