//! Benchmarks for the spectral analyzer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use siglab_dsp::signal::grid::TimeGrid;
use siglab_dsp::signal::synth::{synthesize, WaveParams, Waveform};
use siglab_dsp::spectrum::{energy_spectral_density, magnitude_spectrum};

use crate::SIGNAL_LENS;

pub fn bench_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/spectrum");
    let fs = 1000.0;

    for &len in SIGNAL_LENS {
        let grid = TimeGrid::from_rate(0.0, fs, len);
        let x = synthesize(&WaveParams::new(1.0, 50.0, 0.0, Waveform::Sine), &grid);

        group.bench_with_input(BenchmarkId::new("magnitude", len), &len, |b, _| {
            b.iter(|| magnitude_spectrum(black_box(&x), black_box(fs)))
        });

        group.bench_with_input(BenchmarkId::new("esd", len), &len, |b, _| {
            b.iter(|| energy_spectral_density(black_box(&x), black_box(fs)))
        });
    }

    group.finish();
}
